//! # Survey access rules
//!
//! Viewing is granted to anyone when the survey is public, otherwise to the
//! owner, the edit-access grantees and administrators. Mutation (edit,
//! soft-delete) is granted to the owner and the edit-access grantees only:
//! the administrator role widens viewing but not mutation.

use crate::error::AppError;
use crate::identity::Identity;
use log::warn;
use survey_common::model::survey::Survey;

pub fn can_view(survey: &Survey, caller: &Identity) -> bool {
    if survey.is_public || caller.is_admin() {
        return true;
    }
    caller
        .user_id()
        .is_some_and(|user_id| survey.is_editor(user_id))
}

pub fn can_mutate(survey: &Survey, caller: &Identity) -> bool {
    caller
        .user_id()
        .is_some_and(|user_id| survey.is_editor(user_id))
}

pub fn ensure_view(survey: &Survey, caller: &Identity) -> Result<(), AppError> {
    if can_view(survey, caller) {
        return Ok(());
    }
    warn!(
        "Caller {} denied view of survey {}",
        caller.respondent_id(),
        survey.id
    );
    Err(AppError::PermissionDenied(format!(
        "not allowed to view survey {}",
        survey.id
    )))
}

pub fn ensure_mutate(survey: &Survey, caller: &Identity) -> Result<(), AppError> {
    if can_mutate(survey, caller) {
        return Ok(());
    }
    warn!(
        "Caller {} denied changes to survey {}",
        caller.respondent_id(),
        survey.id
    );
    Err(AppError::PermissionDenied(format!(
        "not allowed to modify survey {}",
        survey.id
    )))
}
