//! Per-card finish override rules.

use crate::cards::{CardDefinition, Finish};
use crate::core::FinishOverride;

/// Apply the first rule matching this card and drawn finish.
///
/// Cards without a matching rule keep the drawn finish.
#[must_use]
pub fn resolve_finish(rules: &[FinishOverride], card: &CardDefinition, drawn: Finish) -> Finish {
    rules
        .iter()
        .find(|rule| rule.card_name == card.name && rule.forbidden == drawn)
        .map_or(drawn, |rule| rule.substitute)
}
