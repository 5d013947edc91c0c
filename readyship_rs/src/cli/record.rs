//! Output records for the preview CLI: one line per observed change, either
//! styled for a terminal or as JSON lines.

use std::collections::BTreeMap;

use console::style;
use serde::Serialize;

use crate::counter::format_grouped;
use crate::phase::Phase;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Record {
    Phase {
        at_ms: u64,
        carousel: String,
        index: usize,
        title: String,
        phase: Phase,
    },
    Reveal {
        at_ms: u64,
        carousel: String,
        index: usize,
    },
    Selected {
        at_ms: u64,
        selector: String,
        index: usize,
        title: String,
        auto_cycle: bool,
    },
    Count {
        at_ms: u64,
        value: u64,
        added: u64,
    },
    Tally {
        events: BTreeMap<&'static str, u64>,
        added: u64,
        value: u64,
    },
    Done {
        name: String,
        index: usize,
        changes: u64,
    },
}

impl Record {
    fn human(&self) -> String {
        match self {
            Record::Phase {
                at_ms,
                carousel,
                index,
                title,
                phase,
            } => {
                let phase = match phase {
                    Phase::Visible => style(phase.to_string()).green(),
                    Phase::FadingOut => style(phase.to_string()).yellow(),
                    Phase::Advancing => style(phase.to_string()).dim(),
                };
                format!("{} {carousel} #{index} {phase} {title}", stamp(*at_ms))
            }
            Record::Reveal {
                at_ms,
                carousel,
                index,
            } => format!("{} {carousel} #{index} {}", stamp(*at_ms), style("reveal").cyan()),
            Record::Selected {
                at_ms,
                selector,
                index,
                title,
                auto_cycle,
            } => {
                let mode = if *auto_cycle {
                    style("auto").green()
                } else {
                    style("pinned").magenta()
                };
                format!("{} {selector} #{index} {mode} {title}", stamp(*at_ms))
            }
            Record::Count {
                at_ms,
                value,
                added,
            } => format!(
                "{} {} {}",
                stamp(*at_ms),
                style(format_grouped(*value)).bold(),
                style(format!("+{added}")).green()
            ),
            Record::Tally {
                events,
                added,
                value,
            } => {
                let classes: Vec<String> = events.iter().map(|(k, v)| format!("{k} {v}")).collect();
                format!(
                    "{} {} events ({}), added {}, now {}",
                    style("✓").green().bold(),
                    events.values().sum::<u64>(),
                    classes.join(", "),
                    format_grouped(*added),
                    format_grouped(*value)
                )
            }
            Record::Done {
                name,
                index,
                changes,
            } => format!(
                "{} {name}: {changes} changes, ended on #{index}",
                style("✓").green().bold()
            ),
        }
    }
}

fn stamp(at_ms: u64) -> String {
    style(format!("[{at_ms:>7}ms]")).dim().to_string()
}

/// Writes records to stdout.
#[derive(Debug, Clone, Copy)]
pub struct Emitter {
    pub json: bool,
}

impl Emitter {
    pub fn emit(&self, record: &Record) -> anyhow::Result<()> {
        if self.json {
            println!("{}", serde_json::to_string(record)?);
        } else {
            println!("{}", record.human());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_lines_are_tagged() {
        let record = Record::Phase {
            at_ms: 3_000,
            carousel: "alerts".into(),
            index: 0,
            title: "63 VIP Customers Ready".into(),
            phase: Phase::FadingOut,
        };
        let line = serde_json::to_string(&record).unwrap();
        assert!(line.contains(r#""event":"phase""#));
        assert!(line.contains(r#""phase":"fading_out""#));
    }

    #[test]
    fn human_count_is_grouped() {
        console::set_colors_enabled(false);
        let line = Record::Count {
            at_ms: 250,
            value: 2_105_170,
            added: 14,
        }
        .human();
        assert_eq!(line, "[    250ms] 2,105,170 +14");
    }
}
