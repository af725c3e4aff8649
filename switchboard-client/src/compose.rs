//! Capability-gated query composition.
//!
//! A query template is an operation body with named `{{slot}}` insertion
//! points plus a declarative table binding each slot to a capability and a
//! field fragment. Composition substitutes a slot's fragment iff the
//! capability holds, and the empty string otherwise, so the resulting query
//! only ever requests fields the server will authorize. Templates are data,
//! not string concatenation, which keeps composition testable offline.

use crate::error::ComposeError;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use switchboard_core::{Capability, CapabilitySet};

/// A named field block conditionally included in a composed query.
#[derive(Debug, Clone, Copy)]
pub struct FieldFragment {
    /// Insertion-point name as it appears between `{{` and `}}` in the body.
    pub slot: &'static str,
    /// Capability gating this fragment.
    pub capability: Capability,
    /// The GraphQL field text substituted when the capability holds.
    pub fields: &'static str,
}

/// A GraphQL operation with zero or more capability-gated insertion points.
#[derive(Debug, Clone, Copy)]
pub struct QueryTemplate {
    pub name: &'static str,
    pub body: &'static str,
    pub fragments: &'static [FieldFragment],
}

impl QueryTemplate {
    /// Compose the exact query string to send for the given capability set.
    ///
    /// Deterministic: equal `(template, capabilities)` inputs always produce
    /// byte-identical output. A template with zero insertion points composes
    /// to its body unchanged. Malformed slot/fragment bindings are programmer
    /// errors and fail fast rather than silently dropping fields.
    pub fn compose(&self, capabilities: CapabilitySet) -> Result<String, ComposeError> {
        for (i, fragment) in self.fragments.iter().enumerate() {
            if self.fragments[..i].iter().any(|f| f.slot == fragment.slot) {
                return Err(ComposeError::DuplicateFragment {
                    template: self.name,
                    slot: fragment.slot,
                });
            }
        }

        let mut out = String::with_capacity(self.body.len());
        let mut used: Vec<&'static str> = Vec::with_capacity(self.fragments.len());
        let mut rest = self.body;

        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            let Some(end) = after.find("}}") else {
                return Err(ComposeError::UnterminatedSlot {
                    template: self.name,
                });
            };
            let slot = &after[..end];
            let Some(fragment) = self.fragments.iter().find(|f| f.slot == slot) else {
                return Err(ComposeError::UnboundSlot {
                    template: self.name,
                    slot: slot.to_string(),
                });
            };
            if !used.contains(&fragment.slot) {
                used.push(fragment.slot);
            }
            if capabilities.allows(fragment.capability) {
                out.push_str(fragment.fields);
            }
            rest = &after[end + 2..];
        }
        out.push_str(rest);

        if let Some(unused) = self.fragments.iter().find(|f| !used.contains(&f.slot)) {
            return Err(ComposeError::UnusedFragment {
                template: self.name,
                slot: unused.slot,
            });
        }

        Ok(out)
    }
}

static COMPOSED: Lazy<Mutex<HashMap<(&'static str, u8), Arc<str>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Memoized composition keyed on `(template name, capability bits)`.
///
/// Composition is deterministic, so the pair is a sound cache key. Template
/// names are unique across the query tables in [`crate::queries`].
pub fn composed(
    template: &QueryTemplate,
    capabilities: CapabilitySet,
) -> Result<Arc<str>, ComposeError> {
    let key = (template.name, capabilities.bits());
    if let Some(hit) = COMPOSED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&key)
        .cloned()
    {
        return Ok(hit);
    }
    let query: Arc<str> = Arc::from(template.compose(capabilities)?);
    COMPOSED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(key, Arc::clone(&query));
    Ok(query)
}

#[cfg(test)]
mod tests {
    use super::*;

    const GATED: QueryTemplate = QueryTemplate {
        name: "TestGated",
        body: "query { things { nodes { id {{user}} {{channel}} } } }",
        fragments: &[
            FieldFragment {
                slot: "user",
                capability: Capability::Users,
                fields: "user { id }",
            },
            FieldFragment {
                slot: "channel",
                capability: Capability::Channels,
                fields: "channel { id }",
            },
        ],
    };

    const PLAIN: QueryTemplate = QueryTemplate {
        name: "TestPlain",
        body: "query { things { nodes { id } } }",
        fragments: &[],
    };

    #[test]
    fn test_zero_slot_template_composes_to_itself() {
        let out = PLAIN.compose(CapabilitySet::empty()).unwrap();
        assert_eq!(out, PLAIN.body);
    }

    #[test]
    fn test_all_capabilities_include_all_fragments() {
        let out = GATED.compose(CapabilitySet::all()).unwrap();
        assert!(out.contains("user { id }"));
        assert!(out.contains("channel { id }"));
    }

    #[test]
    fn test_missing_capability_substitutes_empty() {
        let out = GATED.compose(CapabilitySet::USERS).unwrap();
        assert!(out.contains("user { id }"));
        assert!(!out.contains("channel { id }"));
        assert!(!out.contains("{{"));
    }

    #[test]
    fn test_composition_is_deterministic() {
        let caps = CapabilitySet::USERS | CapabilitySet::CHANNELS;
        assert_eq!(GATED.compose(caps).unwrap(), GATED.compose(caps).unwrap());
    }

    #[test]
    fn test_unbound_slot_fails_fast() {
        const BROKEN: QueryTemplate = QueryTemplate {
            name: "TestUnbound",
            body: "query { things { {{mystery}} } }",
            fragments: &[],
        };
        assert_eq!(
            BROKEN.compose(CapabilitySet::all()).unwrap_err(),
            ComposeError::UnboundSlot {
                template: "TestUnbound",
                slot: "mystery".to_string(),
            }
        );
    }

    #[test]
    fn test_unused_fragment_fails_fast() {
        const BROKEN: QueryTemplate = QueryTemplate {
            name: "TestUnused",
            body: "query { things { id } }",
            fragments: &[FieldFragment {
                slot: "user",
                capability: Capability::Users,
                fields: "user { id }",
            }],
        };
        assert_eq!(
            BROKEN.compose(CapabilitySet::all()).unwrap_err(),
            ComposeError::UnusedFragment {
                template: "TestUnused",
                slot: "user",
            }
        );
    }

    #[test]
    fn test_duplicate_fragment_fails_fast() {
        const BROKEN: QueryTemplate = QueryTemplate {
            name: "TestDup",
            body: "query { {{user}} }",
            fragments: &[
                FieldFragment {
                    slot: "user",
                    capability: Capability::Users,
                    fields: "user { id }",
                },
                FieldFragment {
                    slot: "user",
                    capability: Capability::Users,
                    fields: "user { name }",
                },
            ],
        };
        assert_eq!(
            BROKEN.compose(CapabilitySet::all()).unwrap_err(),
            ComposeError::DuplicateFragment {
                template: "TestDup",
                slot: "user",
            }
        );
    }

    #[test]
    fn test_unterminated_slot_fails_fast() {
        const BROKEN: QueryTemplate = QueryTemplate {
            name: "TestUnterminated",
            body: "query { things { {{user } }",
            fragments: &[],
        };
        assert_eq!(
            BROKEN.compose(CapabilitySet::all()).unwrap_err(),
            ComposeError::UnterminatedSlot {
                template: "TestUnterminated",
            }
        );
    }

    #[test]
    fn test_memoized_composition_returns_same_string() {
        let a = composed(&GATED, CapabilitySet::USERS).unwrap();
        let b = composed(&GATED, CapabilitySet::USERS).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(&*a, GATED.compose(CapabilitySet::USERS).unwrap().as_str());
    }
}
