//! Property-based tests for the workflow service and policy.

use atelier_shared::types::EmployeeId;
use proptest::prelude::*;

use crate::workflow::error::WorkflowError;
use crate::workflow::policy::{Actor, ActorRole, TransitionPolicy};
use crate::workflow::service::WorkflowService;
use crate::workflow::types::{Action, DocumentKind, DocumentStatus, Transition};

fn arb_kind() -> impl Strategy<Value = DocumentKind> {
    prop_oneof![
        Just(DocumentKind::PurchaseOrder),
        Just(DocumentKind::WarehouseReceipt),
        Just(DocumentKind::ShiftClose),
    ]
}

fn arb_status() -> impl Strategy<Value = DocumentStatus> {
    proptest::sample::select(DocumentStatus::ALL.to_vec())
}

fn arb_role() -> impl Strategy<Value = ActorRole> {
    prop_oneof![
        Just(ActorRole::Staff),
        Just(ActorRole::Manager),
        Just(ActorRole::Admin),
    ]
}

fn arb_action() -> impl Strategy<Value = Action> {
    proptest::sample::select(Action::ALL.to_vec())
}

fn arb_actor() -> impl Strategy<Value = Actor> {
    (1i64..10_000, arb_role()).prop_map(|(id, role)| Actor::new(EmployeeId(id), role))
}

/// Strategy for reasons with at least one visible character.
fn arb_reason() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9][a-zA-Z0-9 ]{0,49}".prop_map(String::from)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Only reviewers ever get Approve or Reject.
    #[test]
    fn prop_review_actions_need_reviewer(
        kind in arb_kind(),
        status in arb_status(),
        role in arb_role(),
        is_owner in any::<bool>(),
    ) {
        let set = TransitionPolicy::allowed_actions(kind, status, role, is_owner);
        if set.contains(Action::Approve) || set.contains(Action::Reject) {
            prop_assert!(role.can_review());
            prop_assert_eq!(status, DocumentStatus::PendingReview);
        }
    }

    /// Line changes are only ever allowed while New.
    #[test]
    fn prop_lines_only_editable_while_new(
        kind in arb_kind(),
        status in arb_status(),
        role in arb_role(),
        is_owner in any::<bool>(),
    ) {
        let set = TransitionPolicy::allowed_actions(kind, status, role, is_owner);
        if set.contains(Action::EditLine) || set.contains(Action::DeleteLine) {
            prop_assert_eq!(status, DocumentStatus::New);
            prop_assert!(kind.has_lines());
        }
    }

    /// Terminal statuses allow nothing to anyone.
    #[test]
    fn prop_terminal_is_read_only(
        kind in arb_kind(),
        status in arb_status(),
        role in arb_role(),
        is_owner in any::<bool>(),
    ) {
        prop_assume!(status.is_terminal());
        prop_assert!(TransitionPolicy::allowed_actions(kind, status, role, is_owner).is_empty());
    }

    /// authorize agrees with allowed_actions.
    #[test]
    fn prop_authorize_matches_allowed_set(
        kind in arb_kind(),
        status in arb_status(),
        actor in arb_actor(),
        is_owner in any::<bool>(),
        action in arb_action(),
    ) {
        let allowed = TransitionPolicy::allowed_actions(kind, status, actor.role, is_owner)
            .contains(action);
        let result = TransitionPolicy::authorize(kind, status, &actor, is_owner, action);
        prop_assert_eq!(allowed, result.is_ok());
    }

    /// Every successful transition is a valid edge of the state machine.
    #[test]
    fn prop_transitions_follow_state_machine(
        kind in arb_kind(),
        status in arb_status(),
        actor in arb_actor(),
        reason in arb_reason(),
        action in prop_oneof![Just(Action::Send), Just(Action::Approve), Just(Action::Reject)],
    ) {
        if let Ok(transition) = WorkflowService::apply(kind, status, action, &actor, Some(&reason)) {
            prop_assert!(WorkflowService::is_valid_transition(kind, status, transition.new_status()));
            prop_assert_eq!(transition.action(), action);
        }
    }

    /// Reject carries the actor and trimmed reason.
    #[test]
    fn prop_reject_keeps_reason(kind in arb_kind(), id in 1i64..10_000, reason in arb_reason()) {
        let actor = Actor::new(EmployeeId(id), ActorRole::Manager);
        let transition = WorkflowService::reject(kind, DocumentStatus::PendingReview, &actor, &reason)
            .unwrap();
        match transition {
            Transition::Reject { rejected_by, reason: kept, new_status, .. } => {
                prop_assert_eq!(rejected_by, EmployeeId(id));
                prop_assert_eq!(kept, reason.trim().to_string());
                prop_assert_eq!(new_status, kind.rejected_status());
            }
            other => prop_assert!(false, "Expected Reject, got {:?}", other),
        }
    }

    /// Staff are blocked from approving with NotPermitted, never anything vaguer.
    #[test]
    fn prop_staff_approve_not_permitted(kind in arb_kind(), id in 1i64..10_000) {
        let actor = Actor::new(EmployeeId(id), ActorRole::Staff);
        let result = WorkflowService::approve(kind, DocumentStatus::PendingReview, &actor);
        let is_not_permitted = matches!(result, Err(WorkflowError::NotPermitted { .. }));
        prop_assert!(is_not_permitted);
    }
}
