//! Package-level descriptive fields: name, agent, access conditions, rights.

use crate::mets::vocab::{
    ACCESS_STATUS, METS_AGENT, METS_NAME, MODS_ACCESS_CONDITION, MODS_MODS, MODS_NAME,
    MODS_TITLE, RESTRICTION_ON_ACCESS, USE_AND_REPRODUCTION,
};
use crate::uri::AbsoluteUri;
use crate::xml::XmlDocument;
use tracing::error;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Descriptive {
    pub name: Option<String>,
    pub agent: Option<String>,
    pub access_conditions: Vec<String>,
    pub rights_statement: Option<AbsoluteUri>,
}

impl Descriptive {
    /// Read from the first `mods:mods`, or the whole document when MODS is not
    /// wrapped (EPrints).
    pub fn read(doc: &XmlDocument) -> Self {
        let scope = doc.descendant(MODS_MODS).unwrap_or(&doc.root);

        let name = scope
            .descendant_value(MODS_TITLE)
            .or_else(|| scope.descendant_value(MODS_NAME))
            .filter(|n| !n.trim().is_empty());

        let mut access_conditions = Vec::new();
        let mut rights_statement = None;
        for condition in scope.descendants_named(MODS_ACCESS_CONDITION) {
            let value = condition.value();
            if value.is_empty() {
                continue;
            }
            match condition.attr("type") {
                // "status" is how Goobi writes it
                Some(RESTRICTION_ON_ACCESS) | Some(ACCESS_STATUS) => access_conditions.push(value),
                Some(USE_AND_REPRODUCTION) if rights_statement.is_none() => {
                    match AbsoluteUri::parse(&value) {
                        Ok(uri) => rights_statement = Some(uri),
                        Err(e) => {
                            error!(access_condition = %value, error = %e, "Unable to parse rights statement")
                        }
                    }
                }
                _ => {}
            }
        }

        let agent = doc
            .descendant(METS_AGENT)
            .and_then(|agent| agent.descendant_value(METS_NAME));

        Self {
            name,
            agent,
            access_conditions,
            rights_statement,
        }
    }
}
