//! Authentication reducer.
//!
//! Validates the login and registration forms locally, drives the backend
//! calls, and keeps the shared session holder in sync. Validation failures
//! never reach the backend.

use crate::actions::AuthAction;
use crate::environment::AuthEnvironment;
use crate::state::{AuthState, LoginForm, RegisterForm};
use crate::storage::KeyValueStore;
use crate::validate::{self, FieldErrors};
use parkdeck_api::{AuthApi, LoginRequest, RegisterRequest};
use parkdeck_core::effect::Effect;
use parkdeck_core::reducer::Reducer;
use parkdeck_core::{SmallVec, async_effect, smallvec};

/// Authentication reducer.
#[derive(Debug, Clone)]
pub struct AuthReducer<A, K> {
    _phantom: std::marker::PhantomData<(A, K)>,
}

impl<A, K> AuthReducer<A, K> {
    /// Create an authentication reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<A, K> Default for AuthReducer<A, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A, K> Reducer for AuthReducer<A, K>
where
    A: AuthApi + Clone + 'static,
    K: KeyValueStore + Clone + 'static,
{
    type State = AuthState;
    type Action = AuthAction;
    type Environment = AuthEnvironment<A, K>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ═══════════════════════════════════════════════════════════════
            // LoginFormChanged / RegisterFormChanged: track typing
            // ═══════════════════════════════════════════════════════════════
            AuthAction::LoginFormChanged { form } => {
                state.login = form;
                state.field_errors = FieldErrors::default();
                smallvec![Effect::None]
            }

            AuthAction::RegisterFormChanged { form } => {
                state.register = form;
                state.field_errors = FieldErrors::default();
                smallvec![Effect::None]
            }

            // ═══════════════════════════════════════════════════════════════
            // SubmitLogin: validate locally, then call the backend
            // ═══════════════════════════════════════════════════════════════
            AuthAction::SubmitLogin => {
                if state.submitting {
                    return smallvec![Effect::None];
                }

                let errors = validate::validate_login(&state.login);
                if !errors.is_clean() {
                    state.field_errors = errors;
                    return smallvec![Effect::None];
                }

                state.field_errors = FieldErrors::default();
                state.error = None;
                state.submitting = true;

                let api = env.api.clone();
                let sessions = env.sessions.clone();
                let request = LoginRequest {
                    email: state.login.email.clone(),
                    password: state.login.password.clone(),
                };

                smallvec![async_effect! {
                    match api.login(&request).await {
                        Ok(session) => {
                            if let Err(e) = sessions.login(&session) {
                                tracing::warn!(error = %e, "Session could not be persisted");
                            }
                            Some(AuthAction::LoginSucceeded { session })
                        }
                        Err(e) => {
                            tracing::warn!(error = %e, "Login rejected");
                            Some(AuthAction::LoginFailed {
                                message: e.user_message("Login failed. Please try again."),
                            })
                        }
                    }
                }]
            }

            // ═══════════════════════════════════════════════════════════════
            // SubmitRegister: validate locally, then call the backend
            // ═══════════════════════════════════════════════════════════════
            AuthAction::SubmitRegister => {
                if state.submitting {
                    return smallvec![Effect::None];
                }

                let errors = validate::validate_register(&state.register);
                if !errors.is_clean() {
                    state.field_errors = errors;
                    return smallvec![Effect::None];
                }

                state.field_errors = FieldErrors::default();
                state.error = None;
                state.submitting = true;

                let api = env.api.clone();
                let sessions = env.sessions.clone();
                let request = RegisterRequest {
                    email: state.register.email.clone(),
                    password: state.register.password.clone(),
                    first_name: state.register.first_name.clone(),
                    last_name: state.register.last_name.clone(),
                    phone_number: if state.register.phone_number.is_empty() {
                        None
                    } else {
                        Some(state.register.phone_number.clone())
                    },
                };

                smallvec![async_effect! {
                    match api.register(&request).await {
                        Ok(session) => {
                            if let Err(e) = sessions.login(&session) {
                                tracing::warn!(error = %e, "Session could not be persisted");
                            }
                            Some(AuthAction::RegisterSucceeded { session })
                        }
                        Err(e) => {
                            tracing::warn!(error = %e, "Registration rejected");
                            Some(AuthAction::RegisterFailed {
                                message: e.user_message("Registration failed. Please try again."),
                            })
                        }
                    }
                }]
            }

            // ═══════════════════════════════════════════════════════════════
            // LoginSucceeded / RegisterSucceeded: session is live
            // ═══════════════════════════════════════════════════════════════
            AuthAction::LoginSucceeded { session } => {
                state.submitting = false;
                state.error = None;
                state.session = Some(session);
                state.login = LoginForm::default();
                smallvec![Effect::None]
            }

            AuthAction::RegisterSucceeded { session } => {
                state.submitting = false;
                state.error = None;
                state.session = Some(session);
                state.register = RegisterForm::default();
                smallvec![Effect::None]
            }

            // ═══════════════════════════════════════════════════════════════
            // LoginFailed / RegisterFailed: surface the message
            // ═══════════════════════════════════════════════════════════════
            AuthAction::LoginFailed { message } | AuthAction::RegisterFailed { message } => {
                state.submitting = false;
                state.error = Some(message);
                smallvec![Effect::None]
            }

            // ═══════════════════════════════════════════════════════════════
            // Logout: drop the session now, wipe storage in the background
            // ═══════════════════════════════════════════════════════════════
            AuthAction::Logout => {
                *state = AuthState::default();

                let sessions = env.sessions.clone();
                smallvec![async_effect! {
                    if let Err(e) = sessions.logout() {
                        tracing::warn!(error = %e, "Stored session could not be wiped");
                    }
                    Some(AuthAction::LoggedOut)
                }]
            }

            AuthAction::LoggedOut => smallvec![Effect::None],
        }
    }
}
