use std::collections::HashMap;

/// Field-level checks applied after a request body has deserialized.
///
/// Deserialization already enforces presence and type of every required
/// field; this covers constraints serde cannot express.
pub trait Validate {
    fn validate(&self) -> Result<(), HashMap<String, String>> {
        Ok(())
    }
}

pub fn check_finite(errors: &mut HashMap<String, String>, field: &str, value: f64) {
    if !value.is_finite() {
        errors.insert(field.to_string(), "must be a finite number".to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finite_values_pass() {
        let mut errors = HashMap::new();
        check_finite(&mut errors, "mass", 0.0);
        check_finite(&mut errors, "mass", -12.5);
        assert!(errors.is_empty());
    }

    #[test]
    fn nan_and_infinity_fail() {
        let mut errors = HashMap::new();
        check_finite(&mut errors, "mass", f64::NAN);
        check_finite(&mut errors, "power", f64::NEG_INFINITY);
        assert_eq!(errors.len(), 2);
    }
}
