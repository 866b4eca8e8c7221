//! Plain-text rule listing

use rulebook_domain::Rule;
use std::io::{self, Write};

const ENABLED: &str = "enabled";
const EXCLUDED: &str = "excluded";

/// Write one block per rule: id, ruleset, state, description and location
pub fn write_listing<W: Write>(out: &mut W, rules: &[Rule]) -> io::Result<()> {
    let id_width = rules.iter().map(|r| r.id.len()).max().unwrap_or(0);
    let ruleset_width = rules.iter().map(|r| r.ruleset.len()).max().unwrap_or(0);

    for rule in rules {
        let state = if rule.is_enabled() { ENABLED } else { EXCLUDED };
        writeln!(
            out,
            "{:id_width$}  {:ruleset_width$}  {:8}  {}",
            rule.id,
            rule.ruleset,
            state,
            rule.summary()
        )?;
        for line in rule.description.lines().skip(1) {
            writeln!(out, "{:indent$}{}", "", line, indent = id_width + ruleset_width + 14)?;
        }
        writeln!(
            out,
            "{:indent$}{}",
            "",
            rule.location.display(),
            indent = id_width + ruleset_width + 14
        )?;
    }

    let excluded = rules.iter().filter(|r| r.excluded).count();
    writeln!(
        out,
        "{} rule(s), {} enabled, {} excluded",
        rules.len(),
        rules.len() - excluded,
        excluded
    )
}
