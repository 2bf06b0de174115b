use dhub_kernel::validation::{Validate, Violations};

struct Pair {
    left: i32,
    right: i32,
}

impl Validate for Pair {
    fn validate(&self) -> Result<(), Violations> {
        let mut violations = Violations::new();
        if self.left < 0 {
            violations.push("left", "Left can't be negative");
        }
        if self.right < 0 {
            violations.push("right", "Right can't be negative");
        }
        violations.into_result()
    }
}

#[test]
fn valid_input_yields_ok() {
    assert!(Pair { left: 1, right: 2 }.validate().is_ok());
}

#[test]
fn every_failing_field_is_reported_in_order() {
    let err = Pair { left: -1, right: -2 }.validate().unwrap_err();
    assert_eq!(err.len(), 2);
    assert_eq!(err.to_string(), "left: Left can't be negative; right: Right can't be negative; ");
}

#[test]
fn nested_violations_are_prefixed() {
    let mut outer = Violations::new();
    for (i, pair) in [Pair { left: 0, right: 0 }, Pair { left: 0, right: -5 }].iter().enumerate() {
        if let Err(nested) = pair.validate() {
            outer.extend_nested(&format!("pairs[{i}]"), nested);
        }
    }

    let fields: Vec<_> = outer.iter().map(|v| v.field.as_ref()).collect();
    assert_eq!(fields, ["pairs[1].right"]);
    assert_eq!(outer.to_string(), "pairs[1].right: Right can't be negative; ");
}

#[test]
fn empty_violations_render_as_nothing() {
    let violations = Violations::new();
    assert!(violations.is_empty());
    assert_eq!(violations.to_string(), "");
    assert!(violations.into_result().is_ok());
}
