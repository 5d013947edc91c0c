//! Odometer-style digit flips for the live counter.
//!
//! Each character position is its own [`DigitCell`]. A cell only animates
//! when its own character changes, so a counter going from `1,299` to
//! `1,300` flips three cells and leaves the `1` and the comma alone.

use serde::Serialize;

/// Outgoing glyph slide-out, `ease-in`.
pub const OUTGOING_MS: u64 = 220;
/// Incoming glyph slide-in, `cubic-bezier(0.16, 1, 0.3, 1)`.
pub const INCOMING_MS: u64 = 260;

const EASE_IN: Bezier = Bezier::new(0.42, 0.0, 1.0, 1.0);
const EASE_OUT_EXPO: Bezier = Bezier::new(0.16, 1.0, 0.3, 1.0);

/// CSS-style cubic bezier timing curve anchored at (0,0) and (1,1).
#[derive(Debug, Clone, Copy)]
struct Bezier {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
}

impl Bezier {
    const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    fn coord(t: f64, p1: f64, p2: f64) -> f64 {
        let u = 1.0 - t;
        3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t
    }

    fn slope(t: f64, p1: f64, p2: f64) -> f64 {
        let u = 1.0 - t;
        3.0 * u * u * p1 + 6.0 * u * t * (p2 - p1) + 3.0 * t * t * (1.0 - p2)
    }

    /// Eased output for linear progress `x` in `[0, 1]`.
    fn ease(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        if x >= 1.0 {
            return 1.0;
        }
        // Newton on x(t) = x, falling back to bisection when the slope is flat
        let mut t = x;
        for _ in 0..8 {
            let err = Self::coord(t, self.x1, self.x2) - x;
            if err.abs() < 1e-7 {
                return Self::coord(t, self.y1, self.y2);
            }
            let d = Self::slope(t, self.x1, self.x2);
            if d.abs() < 1e-6 {
                break;
            }
            t -= err / d;
        }
        let (mut lo, mut hi) = (0.0, 1.0);
        t = x;
        for _ in 0..40 {
            let cx = Self::coord(t, self.x1, self.x2);
            if (cx - x).abs() < 1e-7 {
                break;
            }
            if cx < x {
                lo = t;
            } else {
                hi = t;
            }
            t = (lo + hi) / 2.0;
        }
        Self::coord(t, self.y1, self.y2)
    }
}

/// One glyph in flight. `progress` is eased and runs 0 to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Glyph {
    pub ch: char,
    pub progress: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CellFrame {
    pub incoming: Glyph,
    pub outgoing: Option<Glyph>,
    /// Render key; changes on every flip so a surface restarts its
    /// animation instead of reusing a finished one.
    pub flip: u64,
    pub animated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigitCell {
    current: char,
    outgoing: Option<char>,
    flip: u64,
    changed_at: Option<u64>,
}

impl DigitCell {
    /// A freshly mounted cell shows `ch` without animating.
    pub fn new(ch: char) -> Self {
        Self {
            current: ch,
            outgoing: None,
            flip: 0,
            changed_at: None,
        }
    }

    pub fn current(&self) -> char {
        self.current
    }

    pub fn flips(&self) -> u64 {
        self.flip
    }

    /// Show `ch` from `now` on. Returns whether a flip started.
    ///
    /// A change during a running flip supersedes it: the glyph that was
    /// coming in becomes the one going out.
    pub fn set(&mut self, ch: char, now: u64) -> bool {
        if ch == self.current {
            return false;
        }
        self.outgoing = Some(self.current);
        self.current = ch;
        self.flip += 1;
        self.changed_at = Some(now);
        true
    }

    pub fn is_animating(&self, now: u64) -> bool {
        self.changed_at
            .is_some_and(|at| now.saturating_sub(at) < INCOMING_MS.max(OUTGOING_MS))
    }

    pub fn frame(&self, now: u64) -> CellFrame {
        let Some(at) = self.changed_at else {
            return CellFrame {
                incoming: Glyph {
                    ch: self.current,
                    progress: 1.0,
                },
                outgoing: None,
                flip: self.flip,
                animated: false,
            };
        };
        let elapsed = now.saturating_sub(at);
        let incoming = Glyph {
            ch: self.current,
            progress: EASE_OUT_EXPO.ease(elapsed as f64 / INCOMING_MS as f64) as f32,
        };
        let outgoing = self
            .outgoing
            .filter(|_| elapsed < OUTGOING_MS)
            .map(|ch| Glyph {
                ch,
                progress: EASE_IN.ease(elapsed as f64 / OUTGOING_MS as f64) as f32,
            });
        CellFrame {
            incoming,
            outgoing,
            flip: self.flip,
            animated: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowCell {
    Digit(DigitCell),
    Separator(char),
}

impl RowCell {
    fn mount(ch: char) -> Self {
        if ch.is_ascii_digit() {
            RowCell::Digit(DigitCell::new(ch))
        } else {
            RowCell::Separator(ch)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RowFrame {
    Digit(CellFrame),
    Separator { ch: char },
}

/// A row of cells keyed by position from the left.
///
/// When the text grows a digit (999,999 to 1,000,000) every position after
/// the first shifts meaning and flips; positions that did not exist before
/// mount without animation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DigitRow {
    cells: Vec<RowCell>,
}

impl DigitRow {
    pub fn new(text: &str) -> Self {
        Self {
            cells: text.chars().map(RowCell::mount).collect(),
        }
    }

    pub fn cells(&self) -> &[RowCell] {
        &self.cells
    }

    pub fn text(&self) -> String {
        self.cells
            .iter()
            .map(|cell| match cell {
                RowCell::Digit(d) => d.current(),
                RowCell::Separator(ch) => *ch,
            })
            .collect()
    }

    /// Update to `text` at `now`. Returns how many cells started a flip.
    pub fn set(&mut self, text: &str, now: u64) -> usize {
        let chars: Vec<char> = text.chars().collect();
        self.cells.truncate(chars.len());
        let mut flipped = 0;
        for (i, &ch) in chars.iter().enumerate() {
            match self.cells.get_mut(i) {
                Some(RowCell::Digit(cell)) if ch.is_ascii_digit() => {
                    if cell.set(ch, now) {
                        flipped += 1;
                    }
                }
                Some(slot) => *slot = RowCell::mount(ch),
                None => self.cells.push(RowCell::mount(ch)),
            }
        }
        flipped
    }

    pub fn is_animating(&self, now: u64) -> bool {
        self.cells.iter().any(|cell| match cell {
            RowCell::Digit(d) => d.is_animating(now),
            RowCell::Separator(_) => false,
        })
    }

    pub fn frame(&self, now: u64) -> Vec<RowFrame> {
        self.cells
            .iter()
            .map(|cell| match cell {
                RowCell::Digit(d) => RowFrame::Digit(d.frame(now)),
                RowCell::Separator(ch) => RowFrame::Separator { ch: *ch },
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_animation_on_mount() {
        let cell = DigitCell::new('4');
        let frame = cell.frame(0);
        assert!(!frame.animated);
        assert_eq!(frame.incoming, Glyph { ch: '4', progress: 1.0 });
        assert_eq!(frame.outgoing, None);
        assert!(!cell.is_animating(0));
    }

    #[test]
    fn same_value_does_not_flip() {
        let mut cell = DigitCell::new('4');
        assert!(!cell.set('4', 100));
        assert_eq!(cell.flips(), 0);
        assert!(!cell.frame(100).animated);
    }

    #[test]
    fn change_runs_outgoing_and_incoming() {
        let mut cell = DigitCell::new('4');
        assert!(cell.set('5', 1_000));

        let start = cell.frame(1_000);
        assert_eq!(start.flip, 1);
        assert_eq!(start.incoming.ch, '5');
        assert_eq!(start.incoming.progress, 0.0);
        assert_eq!(start.outgoing.map(|g| g.ch), Some('4'));

        let mid = cell.frame(1_110);
        assert!(mid.incoming.progress > 0.5, "ease-out front loads: {}", mid.incoming.progress);
        let out = mid.outgoing.expect("still sliding out");
        assert!(out.progress > 0.0 && out.progress < 0.5);

        assert_eq!(cell.frame(1_000 + OUTGOING_MS).outgoing, None);
        assert!(cell.is_animating(1_000 + OUTGOING_MS));
        assert_eq!(cell.frame(1_000 + INCOMING_MS).incoming.progress, 1.0);
        assert!(!cell.is_animating(1_000 + INCOMING_MS));
    }

    #[test]
    fn rapid_changes_supersede() {
        let mut cell = DigitCell::new('1');
        cell.set('2', 0);
        cell.set('3', 50);
        let frame = cell.frame(50);
        assert_eq!(frame.flip, 2);
        assert_eq!(frame.incoming.ch, '3');
        assert_eq!(frame.outgoing.map(|g| g.ch), Some('2'));
        assert_eq!(frame.incoming.progress, 0.0);
    }

    #[test]
    fn easing_is_monotonic() {
        for curve in [EASE_IN, EASE_OUT_EXPO] {
            let mut prev = 0.0;
            for step in 0..=100 {
                let y = curve.ease(step as f64 / 100.0);
                assert!(y + 1e-9 >= prev, "{curve:?} dipped at {step}");
                prev = y;
            }
            assert_eq!(curve.ease(1.0), 1.0);
        }
    }

    #[test]
    fn row_only_flips_changed_positions() {
        let mut row = DigitRow::new("1,299");
        assert_eq!(row.set("1,300", 10), 3);
        let frames = row.frame(10);
        assert!(matches!(frames[0], RowFrame::Digit(f) if !f.animated));
        assert_eq!(frames[1], RowFrame::Separator { ch: ',' });
        assert!(matches!(frames[2], RowFrame::Digit(f) if f.animated && f.incoming.ch == '3'));
        assert_eq!(row.text(), "1,300");
    }

    #[test]
    fn row_growth_mounts_new_positions_quietly() {
        let mut row = DigitRow::new("999,999");
        row.set("1,000,000", 0);
        assert_eq!(row.text(), "1,000,000");
        let frames = row.frame(0);
        // position 1 was a digit and is now a separator
        assert_eq!(frames[1], RowFrame::Separator { ch: ',' });
        // positions 7 and 8 are new
        assert!(matches!(frames[7], RowFrame::Digit(f) if !f.animated));
        assert!(matches!(frames[8], RowFrame::Digit(f) if !f.animated));
    }

    #[test]
    fn row_shrink_truncates() {
        let mut row = DigitRow::new("12,345");
        row.set("999", 0);
        assert_eq!(row.cells().len(), 3);
        assert_eq!(row.text(), "999");
    }
}
