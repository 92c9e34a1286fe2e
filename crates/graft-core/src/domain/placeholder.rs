//! Marker-anchored insertion.
//!
//! [`replace`] is the only primitive that touches existing generated files.
//! It swaps the single occurrence of a marker for `fragment + marker`, so the
//! marker survives every call and successive fragments pile up in call order
//! just above it.

use crate::domain::{error::DomainError, value_objects::Marker};

/// Insert `fragment` immediately before the single occurrence of `marker`.
///
/// # Errors
/// - `MarkerNotFound` when `content` lacks the marker
/// - `AmbiguousMarker` when it occurs more than once
/// - `InvalidTemplate` when the fragment itself contains the marker, which
///   would leave two anchors behind
pub fn replace(content: &str, marker: &Marker, fragment: &str) -> Result<String, DomainError> {
    let token = marker.token();

    match content.matches(token).count() {
        0 => {
            return Err(DomainError::MarkerNotFound {
                marker: marker.name().to_string(),
                path: None,
            });
        }
        1 => {}
        count => {
            return Err(DomainError::AmbiguousMarker {
                marker: marker.name().to_string(),
                count,
                path: None,
            });
        }
    }

    if fragment.contains(token) {
        return Err(DomainError::InvalidTemplate(format!(
            "fragment for marker '{}' contains the marker itself",
            marker.name()
        )));
    }

    Ok(content.replacen(token, &format!("{fragment}{token}"), 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    const M: Marker = Marker::new("test", "// @@marker@@");

    fn doc() -> String {
        "head\n// @@marker@@\ntail\n".to_string()
    }

    #[test]
    fn fragment_lands_before_marker() {
        let out = replace(&doc(), &M, "F1\n").unwrap();
        assert_eq!(out, "head\nF1\n// @@marker@@\ntail\n");
    }

    #[test]
    fn marker_survives_exactly_once() {
        let out = replace(&doc(), &M, "anything\n").unwrap();
        assert_eq!(out.matches(M.token()).count(), 1);
        let idx = out.find(M.token()).unwrap();
        assert!(out[..idx].ends_with("anything\n"));
    }

    #[test]
    fn successive_calls_keep_call_order() {
        let once = replace(&doc(), &M, "F1\n").unwrap();
        let twice = replace(&once, &M, "F2\n").unwrap();
        assert_eq!(twice, "head\nF1\nF2\n// @@marker@@\ntail\n");

        // A third caller still finds the anchor.
        assert!(replace(&twice, &M, "F3\n").is_ok());
    }

    #[test]
    fn reverse_order_reverses_output() {
        let out = replace(&replace(&doc(), &M, "F2\n").unwrap(), &M, "F1\n").unwrap();
        assert!(out.find("F2").unwrap() < out.find("F1").unwrap());
    }

    #[test]
    fn missing_marker_fails() {
        let err = replace("no anchor here", &M, "F").unwrap_err();
        assert_eq!(
            err,
            DomainError::MarkerNotFound {
                marker: "test".into(),
                path: None
            }
        );
    }

    #[test]
    fn duplicated_marker_fails() {
        let content = format!("{0}\n{0}\n", M.token());
        assert!(matches!(
            replace(&content, &M, "F"),
            Err(DomainError::AmbiguousMarker { count: 2, .. })
        ));
    }

    #[test]
    fn fragment_carrying_the_marker_is_rejected() {
        let fragment = format!("x {}", M.token());
        assert!(replace(&doc(), &M, &fragment).is_err());
    }

    #[test]
    fn empty_fragment_is_identity() {
        assert_eq!(replace(&doc(), &M, "").unwrap(), doc());
    }
}
