//! This file defines some functions that check the pre-conditions
//! of induction and pruning.

use crate::error::{Result, TreeError};


/// Check whether the gain threshold is valid or not.
#[inline(always)]
pub(crate) fn check_threshold(threshold: f64) -> Result<()> {
    if threshold.is_finite() && threshold >= 0f64 {
        Ok(())
    } else {
        Err(TreeError::InvalidThreshold { threshold })
    }
}


/// Check whether the pruning penalty is valid or not.
#[inline(always)]
pub(crate) fn check_penalty(penalty: f64) -> Result<()> {
    if penalty.is_finite() && penalty >= 0f64 {
        Ok(())
    } else {
        Err(TreeError::InvalidPenalty { penalty })
    }
}


/// Check that `names` lists each attribute once and never lists `class`.
#[inline(always)]
pub(crate) fn check_attributes<'a, I>(names: I, class: &str) -> Result<()>
    where I: IntoIterator<Item = &'a str>
{
    let mut seen = std::collections::HashSet::new();
    for name in names {
        if name == class {
            return Err(TreeError::ClassAsAttribute { name: name.to_string() });
        }
        if !seen.insert(name) {
            return Err(TreeError::DuplicateAttribute { name: name.to_string() });
        }
    }
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds() {
        assert!(check_threshold(0f64).is_ok());
        assert!(check_threshold(-0.1).is_err());
        assert!(check_threshold(f64::NAN).is_err());
    }

    #[test]
    fn penalties() {
        assert!(check_penalty(0.5).is_ok());
        assert!(check_penalty(f64::INFINITY).is_err());
    }

    #[test]
    fn attributes() {
        assert!(check_attributes(["a", "b"], "y").is_ok());
        assert!(matches!(
            check_attributes(["a", "y"], "y"),
            Err(TreeError::ClassAsAttribute { .. })
        ));
        assert!(matches!(
            check_attributes(["a", "a"], "y"),
            Err(TreeError::DuplicateAttribute { .. })
        ));
    }
}
