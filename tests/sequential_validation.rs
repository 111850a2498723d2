//! Integration tests for chained and independent step validation

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use stepchain::prelude::*;
use stepchain::{assert_step_invalid, assert_step_valid};

// A small sign-up wizard: each page is a step over shared form state.
#[derive(Debug, Default)]
struct SignUp {
    username: String,
    email: String,
    accepted_terms: bool,
}

fn wizard(form: &Rc<RefCell<SignUp>>) -> ValidationSteps {
    let mut steps = ValidationSteps::new();

    let f = Rc::clone(form);
    steps
        .add_with_message(
            10,
            move || f.borrow().username.len() >= 3,
            || "username must have at least 3 characters".to_string(),
        )
        .unwrap();

    let f = Rc::clone(form);
    let g = Rc::clone(form);
    steps
        .add_with_message(
            20,
            move || f.borrow().email.contains('@'),
            move || format!("'{}' is not an email address", g.borrow().email),
        )
        .unwrap();

    let f = Rc::clone(form);
    steps
        .add_with_message(
            30,
            move || f.borrow().accepted_terms,
            || "terms must be accepted".to_string(),
        )
        .unwrap();

    steps
}

#[test]
fn test_wizard_pages_unlock_in_order() {
    let form = Rc::new(RefCell::new(SignUp::default()));
    let steps = wizard(&form);

    assert_step_invalid!(steps, 10);
    assert_step_invalid!(steps, 20);
    assert_step_invalid!(steps, 30);

    // Later pages stay invalid while an earlier page fails.
    form.borrow_mut().email = "ada@example.com".to_string();
    form.borrow_mut().accepted_terms = true;
    assert_step_invalid!(steps, 30);

    form.borrow_mut().username = "ada".to_string();
    assert_step_valid!(steps, 10);
    assert_step_valid!(steps, 20);
    assert_step_valid!(steps, 30);
}

#[test]
fn test_messages_reflect_current_state() {
    let form = Rc::new(RefCell::new(SignUp::default()));
    let steps = wizard(&form);

    form.borrow_mut().email = "nope".to_string();
    assert_eq!(
        steps.step_validation_message(20, false).unwrap(),
        "'nope' is not an email address"
    );

    form.borrow_mut().email = "still-nope".to_string();
    assert_eq!(
        steps.step_validation_message(20, true).unwrap(),
        "'still-nope' is not an email address"
    );
}

#[test]
fn test_message_ignores_upstream_failures() {
    let form = Rc::new(RefCell::new(SignUp {
        accepted_terms: true,
        ..SignUp::default()
    }));
    let steps = wizard(&form);

    // Step 30 is invalid through the chain but its own check holds.
    assert_step_invalid!(steps, 30);
    assert_eq!(steps.step_validation_message(30, false).unwrap(), "");
    assert_eq!(
        steps.step_validation_message(30, true).unwrap(),
        "terms must be accepted"
    );
}

#[test]
fn test_policy_switch_takes_effect_immediately() {
    let mut steps = ValidationSteps::new();
    steps
        .add(1, || true)
        .unwrap()
        .add(2, || false)
        .unwrap()
        .add(3, || true)
        .unwrap();

    assert_eq!(steps.is_step_valid(3), Ok(false));
    steps.set_sequential_validation(false);
    assert_eq!(steps.is_step_valid(3), Ok(true));
    steps.set_policy(ValidationPolicy::Sequential);
    assert_eq!(steps.is_step_valid(3), Ok(false));
}

#[test]
fn test_predecessor_is_nearest_lower_number() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut steps = ValidationSteps::new();
    for n in [1, 5] {
        let seen = Rc::clone(&seen);
        steps
            .add(n, move || {
                seen.borrow_mut().push(n);
                true
            })
            .unwrap();
    }

    assert_eq!(steps.is_step_valid(5), Ok(true));
    assert_eq!(*seen.borrow(), vec![1, 5]);
    assert!(steps.get_step(4).unwrap_err().is_not_found());
}

#[test]
fn test_current_check_skipped_when_chain_fails() {
    let calls = Rc::new(Cell::new(0));
    let mut steps = ValidationSteps::new();
    steps.add(1, || false).unwrap();
    let c = Rc::clone(&calls);
    steps
        .add(2, move || {
            c.set(c.get() + 1);
            true
        })
        .unwrap();

    assert_eq!(steps.is_step_valid(2), Ok(false));
    assert_eq!(calls.get(), 0);

    steps.set_sequential_validation(false);
    assert_eq!(steps.is_step_valid(2), Ok(true));
    assert_eq!(calls.get(), 1);
}

#[test]
fn test_not_found_errors_name_the_number() {
    let mut steps = ValidationSteps::new();
    steps.add(1, || true).unwrap();

    for err in [
        steps.is_step_valid(404).unwrap_err(),
        steps.get_step(404).unwrap_err(),
        steps.step_validation_message(404, false).unwrap_err(),
    ] {
        assert_eq!(err, StepError::NotFound { number: 404 });
        assert!(err.to_string().contains("404"));
    }
    assert_eq!(
        steps.remove(404).unwrap_err().to_string(),
        "step with Number=404 not found"
    );
}

#[test]
fn test_seeded_from_steps_keeps_first_of_duplicates() {
    let steps = ValidationSteps::from_steps(vec![
        ValidationStep::with_message(5, || true, || "a".to_string()).unwrap(),
        ValidationStep::new(1, || true).unwrap(),
        ValidationStep::with_message(5, || false, || "b".to_string()).unwrap(),
        ValidationStep::new(3, || true).unwrap(),
    ]);

    let numbers: Vec<i32> = steps.iter().map(ValidationStep::number).collect();
    assert_eq!(numbers, vec![1, 3, 5]);
    assert_eq!(steps.step_validation_message(5, true).unwrap(), "a");
}

#[test]
fn test_copy_to_via_collection() {
    let mut steps = ValidationSteps::new();
    steps.add(2, || true).unwrap().add(1, || false).unwrap();

    let mut target: Vec<Option<ValidationStep>> = vec![None; 2];
    steps.steps().copy_to(&mut target, 0).unwrap();

    let copied: Vec<(i32, bool)> = target
        .iter()
        .flatten()
        .map(|s| (s.number(), s.is_valid()))
        .collect();
    assert_eq!(copied, vec![(1, false), (2, true)]);
}

#[test]
fn test_validate_collects_every_failure() {
    let form = Rc::new(RefCell::new(SignUp {
        username: "ada".to_string(),
        ..SignUp::default()
    }));
    let mut steps = wizard(&form);
    steps.set_policy(ValidationPolicy::Independent);

    match steps.validate() {
        Validation::Failure(failures) => {
            let numbers: Vec<i32> = failures.iter().map(|f| f.number).collect();
            assert_eq!(numbers, vec![20, 30]);
            assert_eq!(failures[1].message, "terms must be accepted");
        }
        Validation::Success(()) => panic!("Expected failures"),
    }
}
