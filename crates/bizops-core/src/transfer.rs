//! Subphase quantity transfers.
//!
//! Moving completed quantity from one subphase to another takes two API
//! calls (lower the source, raise the target). The plan is validated up
//! front so the target never ends above its expected quantity; the app
//! executes the steps and compensates when the second one fails.

use serde::{Deserialize, Serialize};

use crate::domain::{Subphase, SubphaseUpdate};

/// Address of a subphase inside an item
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubphaseRef {
    pub item_id: String,
    pub phase_id: String,
    pub subphase_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    pub source: SubphaseRef,
    pub target: SubphaseRef,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransferError {
    #[error("Enter a quantity greater than zero")]
    ZeroQuantity,

    #[error("Source and target are the same subphase")]
    SameSubphase,

    #[error("Only {available} completed units are available to move")]
    InsufficientSource { available: u32 },

    #[error("Target would exceed its expected quantity ({expected}); at most {room} more fit")]
    ExceedsExpected { expected: u32, room: u32 },
}

/// One quantity write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantityUpdate {
    pub subphase: SubphaseRef,
    pub previous_quantity: u32,
    pub new_quantity: u32,
    pub completed: bool,
}

impl QuantityUpdate {
    pub fn body(&self) -> SubphaseUpdate {
        SubphaseUpdate {
            current_quantity: Some(self.new_quantity),
            completed: Some(self.completed),
            assigned_employee: None,
        }
    }

    /// The write that puts the subphase back where it was
    pub fn revert(&self, expected_quantity: u32) -> QuantityUpdate {
        QuantityUpdate {
            subphase: self.subphase.clone(),
            previous_quantity: self.new_quantity,
            new_quantity: self.previous_quantity,
            completed: expected_quantity > 0 && self.previous_quantity >= expected_quantity,
        }
    }
}

/// Both writes of a validated transfer, in execution order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferPlan {
    pub decrement_source: QuantityUpdate,
    pub increment_target: QuantityUpdate,
    source_expected: u32,
}

impl TransferPlan {
    /// Compensating write used when the target update fails after the source was lowered
    pub fn compensation(&self) -> QuantityUpdate {
        self.decrement_source.revert(self.source_expected)
    }
}

fn is_complete(current: u32, expected: u32) -> bool {
    expected > 0 && current >= expected
}

/// Validate a transfer against the current subphase records
pub fn plan_transfer(source: &Subphase, target: &Subphase, request: &TransferRequest) -> Result<TransferPlan, TransferError> {
    if request.quantity == 0 {
        return Err(TransferError::ZeroQuantity);
    }
    if request.source == request.target {
        return Err(TransferError::SameSubphase);
    }
    if request.quantity > source.current_quantity {
        return Err(TransferError::InsufficientSource { available: source.current_quantity });
    }
    let room = target.remaining_quantity();
    if request.quantity > room {
        return Err(TransferError::ExceedsExpected { expected: target.expected_quantity, room });
    }

    let source_after = source.current_quantity - request.quantity;
    let target_after = target.current_quantity + request.quantity;

    Ok(TransferPlan {
        decrement_source: QuantityUpdate {
            subphase: request.source.clone(),
            previous_quantity: source.current_quantity,
            new_quantity: source_after,
            completed: is_complete(source_after, source.expected_quantity),
        },
        increment_target: QuantityUpdate {
            subphase: request.target.clone(),
            previous_quantity: target.current_quantity,
            new_quantity: target_after,
            completed: is_complete(target_after, target.expected_quantity),
        },
        source_expected: source.expected_quantity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sub(current: u32, expected: u32) -> Subphase {
        Subphase {
            id: "s".into(),
            name: "Weld".into(),
            expected_duration: 0,
            expected_quantity: expected,
            current_quantity: current,
            completed: current >= expected,
            assigned_employee: None,
            actual_duration: 0,
        }
    }

    fn at(item: &str) -> SubphaseRef {
        SubphaseRef { item_id: item.into(), phase_id: "p".into(), subphase_id: "s".into() }
    }

    fn request(quantity: u32) -> TransferRequest {
        TransferRequest { source: at("A"), target: at("B"), quantity }
    }

    #[test]
    fn test_valid_plan() {
        let plan = plan_transfer(&sub(10, 10), &sub(2, 8), &request(6)).unwrap();
        assert_eq!(plan.decrement_source.new_quantity, 4);
        assert!(!plan.decrement_source.completed);
        assert_eq!(plan.increment_target.new_quantity, 8);
        assert!(plan.increment_target.completed);
        assert_eq!(plan.increment_target.body().current_quantity, Some(8));
    }

    #[test]
    fn test_target_cannot_exceed_expected() {
        let err = plan_transfer(&sub(10, 10), &sub(5, 8), &request(4)).unwrap_err();
        assert_eq!(err, TransferError::ExceedsExpected { expected: 8, room: 3 });
    }

    #[test]
    fn test_source_must_have_enough() {
        let err = plan_transfer(&sub(2, 10), &sub(0, 8), &request(3)).unwrap_err();
        assert_eq!(err, TransferError::InsufficientSource { available: 2 });
    }

    #[test]
    fn test_zero_and_self_transfer_rejected() {
        assert_eq!(plan_transfer(&sub(5, 5), &sub(0, 5), &request(0)), Err(TransferError::ZeroQuantity));
        let same = TransferRequest { source: at("A"), target: at("A"), quantity: 1 };
        assert_eq!(plan_transfer(&sub(5, 5), &sub(0, 5), &same), Err(TransferError::SameSubphase));
    }

    #[test]
    fn test_compensation_restores_source() {
        let plan = plan_transfer(&sub(10, 10), &sub(0, 8), &request(3)).unwrap();
        let undo = plan.compensation();
        assert_eq!(undo.subphase, at("A"));
        assert_eq!(undo.new_quantity, 10);
        assert!(undo.completed);
    }
}
