//! Walks a three-page checkout form through sequential validation
//!
//! Run with: cargo run --example form_wizard --features tracing

use std::cell::RefCell;
use std::rc::Rc;

use stepchain::prelude::*;

#[derive(Debug, Default)]
struct Checkout {
    address: String,
    card_number: String,
    confirmed: bool,
}

fn checkout_steps(form: &Rc<RefCell<Checkout>>) -> Result<ValidationSteps, StepError> {
    let mut steps = ValidationSteps::new();

    let f = Rc::clone(form);
    steps.add_with_message(
        1,
        move || !f.borrow().address.trim().is_empty(),
        || "shipping address is required".to_string(),
    )?;

    let f = Rc::clone(form);
    steps.add_with_message(
        2,
        move || {
            let form = f.borrow();
            let card = &form.card_number;
            card.len() == 16 && card.chars().all(|c| c.is_ascii_digit())
        },
        || "card number must be 16 digits".to_string(),
    )?;

    let f = Rc::clone(form);
    steps.add_with_message(
        3,
        move || f.borrow().confirmed,
        || "order must be confirmed".to_string(),
    )?;

    Ok(steps)
}

fn show(steps: &ValidationSteps) -> Result<(), StepError> {
    for step in steps {
        let n = step.number();
        tracing::info!(
            step = n,
            valid = steps.is_step_valid(n)?,
            message = %steps.step_validation_message(n, false)?,
            "page status"
        );
    }
    Ok(())
}

fn main() -> Result<(), StepError> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let form = Rc::new(RefCell::new(Checkout::default()));
    let steps = checkout_steps(&form)?;

    tracing::info!("empty form");
    show(&steps)?;

    {
        let mut f = form.borrow_mut();
        f.card_number = "4111111111111111".to_string();
        f.confirmed = true;
    }
    tracing::info!("card and confirmation filled, address still missing");
    show(&steps)?;

    form.borrow_mut().address = "1 Main St".to_string();
    tracing::info!("address filled");
    show(&steps)?;

    match steps.validate() {
        Validation::Success(()) => tracing::info!("checkout complete"),
        Validation::Failure(failures) => tracing::warn!(?failures, "checkout blocked"),
    }
    Ok(())
}
