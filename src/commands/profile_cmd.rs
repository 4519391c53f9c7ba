use crate::errors::AppError;
use crate::models::profile::UserProfile;
use crate::{AppState, ProfileState};

pub fn get_profile(state: &AppState, session_token: &str) -> Result<UserProfile, AppError> {
    crate::auth::guard::validate_session(state, session_token)?;
    Ok(state.profile.lock()?.profile.clone())
}

/// Entra o sale del modo edición y devuelve el modo nuevo.
pub fn toggle_edit(state: &AppState, session_token: &str) -> Result<bool, AppError> {
    crate::auth::guard::validate_session(state, session_token)?;
    let mut profile = state.profile.lock()?;
    profile.editing = !profile.editing;
    Ok(profile.editing)
}

/// Updates one form field, e.g. `phone` or `companyInfo.companyName`.
pub fn update_profile_field(
    state: &AppState,
    session_token: &str,
    path: &str,
    value: String,
) -> Result<UserProfile, AppError> {
    crate::auth::guard::validate_session(state, session_token)?;
    let mut profile = state.profile.lock()?;
    require_editing(&profile)?;
    profile.profile.set_field(path, value)?;
    Ok(profile.profile.clone())
}

pub fn set_profile_photo(
    state: &AppState,
    session_token: &str,
    reference: &str,
) -> Result<UserProfile, AppError> {
    set_photo(state, session_token, "profilePhoto", reference)
}

/// Foto o logo de la empresa.
pub fn set_company_photo(
    state: &AppState,
    session_token: &str,
    reference: &str,
) -> Result<UserProfile, AppError> {
    set_photo(state, session_token, "companyInfo.companyPhoto", reference)
}

fn set_photo(
    state: &AppState,
    session_token: &str,
    path: &str,
    reference: &str,
) -> Result<UserProfile, AppError> {
    crate::auth::guard::validate_session(state, session_token)?;
    let reference = reference.trim();
    if reference.is_empty() {
        return Err(AppError::Validation("La foto no puede estar vacía".into()));
    }
    let mut profile = state.profile.lock()?;
    require_editing(&profile)?;
    profile.profile.set_field(path, reference.to_string())?;
    Ok(profile.profile.clone())
}

fn require_editing(profile: &ProfileState) -> Result<(), AppError> {
    if !profile.editing {
        return Err(AppError::Validation(
            "Activa el modo edición para modificar el perfil".into(),
        ));
    }
    Ok(())
}

/// Validates and saves the profile, leaving edit mode.
pub fn save_profile(state: &AppState, session_token: &str) -> Result<UserProfile, AppError> {
    let session = crate::auth::guard::validate_session(state, session_token)?;

    let mut profile = state.profile.lock()?;
    crate::validation::validate_profile(&profile.profile).map_err(AppError::Validation)?;
    profile.editing = false;
    let saved = profile.profile.clone();
    drop(profile);

    crate::commands::activity_cmd::log_activity(
        state,
        Some(&session.user_id),
        "UPDATE_PROFILE",
        "Perfil guardado",
    );
    Ok(saved)
}
