//! Regression term-name parsing
//!
//! Fitted models name their terms with two interaction conventions:
//! `"{a}:{b}"` and `"{var}Xcrowd_pct"`. Both come from external
//! model-fitting callers and are part of the contract, so the naming
//! rules live behind this single parsing function and nowhere else.

/// The focal explanatory variable
pub const CROWD_PCT: &str = "crowd_pct";

/// Quadratic term of the focal variable
pub const CROWD_PCT_SQUARED: &str = "crowd_pct_2";

/// Intercept column, always 1
pub const INTERCEPT: &str = "Intercept";

/// Parsed form of a regression term name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term<'a> {
    /// `Intercept`
    Intercept,
    /// `crowd_pct`
    CrowdPct,
    /// `crowd_pct_2`
    CrowdPctSquared,
    /// `{a}:{b}` two-way interaction of two named variables
    Interaction { left: &'a str, right: &'a str },
    /// `{partner}Xcrowd_pct` interaction with the focal variable
    CrowdInteraction { partner: &'a str },
    /// Any other plain regressor
    Plain(&'a str),
}

/// Parse one term name
///
/// Rule order mirrors the external convention: names not mentioning
/// `crowd_pct` are either `:`-interactions or plain; the focal
/// variable, its square, and `X`-style crowd interactions follow.
pub fn parse_term(name: &str) -> Term<'_> {
    if name == INTERCEPT {
        return Term::Intercept;
    }
    if !name.contains(CROWD_PCT) {
        if let Some((left, right)) = name.split_once(':') {
            return Term::Interaction { left, right };
        }
        return Term::Plain(name);
    }
    if name == CROWD_PCT {
        return Term::CrowdPct;
    }
    if name == CROWD_PCT_SQUARED {
        return Term::CrowdPctSquared;
    }
    if let Some((partner, rest)) = name.split_once('X') {
        if rest == CROWD_PCT {
            return Term::CrowdInteraction { partner };
        }
    }
    Term::Plain(name)
}

/// Name of a variable's `X`-style interaction with the focal variable
pub fn crowd_interaction_name(variable: &str) -> String {
    format!("{}X{}", variable, CROWD_PCT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_intercept() {
        assert_eq!(parse_term("Intercept"), Term::Intercept);
    }

    #[test]
    fn test_parse_focal_terms() {
        assert_eq!(parse_term("crowd_pct"), Term::CrowdPct);
        assert_eq!(parse_term("crowd_pct_2"), Term::CrowdPctSquared);
    }

    #[test]
    fn test_parse_colon_interaction() {
        assert_eq!(
            parse_term("gini_coefficient:avg_clustering"),
            Term::Interaction {
                left: "gini_coefficient",
                right: "avg_clustering"
            }
        );
    }

    #[test]
    fn test_parse_crowd_interaction() {
        assert_eq!(
            parse_term("avg_clusteringXcrowd_pct"),
            Term::CrowdInteraction {
                partner: "avg_clustering"
            }
        );
    }

    #[test]
    fn test_parse_plain() {
        assert_eq!(parse_term("stars"), Term::Plain("stars"));
        // Contains crowd_pct but matches no known form
        assert_eq!(
            parse_term("crowd_pct_cubed"),
            Term::Plain("crowd_pct_cubed")
        );
    }

    #[test]
    fn test_crowd_interaction_name() {
        assert_eq!(crowd_interaction_name("gini_coefficient"), "gini_coefficientXcrowd_pct");
    }
}
