//! Signed-in session
//!
//! Holds the tokens and user record, mirrored into the key-value store so a
//! later run picks them up. Any [`ApiError::ReauthRequired`] wipes the stored
//! copy as well as the in-memory one.

use crate::api::{ApiClient, ApiError, AuthResponse, Credentials, User};
use crate::store::{keys, KvStore, Persistence};

pub struct AuthSession<S> {
    client: ApiClient,
    persistence: Persistence<S>,
    user: Option<User>,
}

impl<S: KvStore> AuthSession<S> {
    /// Restore whatever credentials were saved by a previous run
    pub fn restore(client: ApiClient, persistence: Persistence<S>) -> Self {
        let access_token: Option<String> = persistence.load(keys::AUTH_TOKEN);
        let refresh_token: Option<String> = persistence.load(keys::REFRESH_TOKEN);
        let user: Option<User> = persistence.load(keys::AUTH_USER);

        if access_token.is_some() {
            tracing::debug!("Restored saved credentials");
        }
        client.set_credentials(Credentials {
            access_token,
            refresh_token,
        });

        Self {
            client,
            persistence,
            user,
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.client.is_authenticated()
    }

    /// The signed-in user's id, or `NotAuthenticated`
    pub fn user_id(&self) -> Result<&str, ApiError> {
        match (&self.user, self.is_authenticated()) {
            (Some(user), true) => Ok(&user.id),
            _ => Err(ApiError::NotAuthenticated),
        }
    }

    pub fn signin(&mut self, email: &str, password: &str) -> Result<&User, ApiError> {
        let result = self.client.signin(email, password);
        self.adopt(result)
    }

    pub fn signup(&mut self, email: &str, password: &str, username: &str) -> Result<&User, ApiError> {
        let result = self.client.signup(email, password, username);
        self.adopt(result)
    }

    /// Sign out; local state is cleared even when the backend call fails
    pub fn signout(&mut self) -> Result<(), ApiError> {
        let result = self.client.signout();
        self.clear();
        result
    }

    /// Refresh the user record from `/auth/me`
    pub fn me(&mut self) -> Result<&User, ApiError> {
        let result = self.client.current_user();
        match result {
            Ok(user) => {
                self.persistence.save(keys::AUTH_USER, &user);
                self.persist_tokens();
                Ok(self.user.insert(user))
            }
            Err(e) => Err(self.on_error(e)),
        }
    }

    /// Run an authenticated call, keeping stored tokens in step with the client
    pub fn call<T>(&mut self, f: impl FnOnce(&ApiClient) -> Result<T, ApiError>) -> Result<T, ApiError> {
        match f(&self.client) {
            Ok(value) => {
                // a 401 retry may have rotated the tokens
                self.persist_tokens();
                Ok(value)
            }
            Err(e) => Err(self.on_error(e)),
        }
    }

    fn adopt(&mut self, result: Result<AuthResponse, ApiError>) -> Result<&User, ApiError> {
        let resp = result.map_err(|e| self.on_error(e))?;
        tracing::info!("Signed in as {}", resp.user.email);
        if resp.requires_onboarding {
            tracing::info!("Onboarding not completed yet");
        }
        self.persistence.save(keys::AUTH_USER, &resp.user);
        self.persist_tokens();
        Ok(self.user.insert(resp.user))
    }

    fn persist_tokens(&self) {
        let creds = self.client.credentials();
        match creds.access_token {
            Some(token) => self.persistence.save(keys::AUTH_TOKEN, &token),
            None => self.persistence.remove(keys::AUTH_TOKEN),
        }
        match creds.refresh_token {
            Some(token) => self.persistence.save(keys::REFRESH_TOKEN, &token),
            None => self.persistence.remove(keys::REFRESH_TOKEN),
        }
    }

    fn on_error(&mut self, e: ApiError) -> ApiError {
        if matches!(e, ApiError::ReauthRequired) {
            tracing::warn!("Credentials rejected, clearing saved session");
            self.clear();
        }
        e
    }

    fn clear(&mut self) {
        self.client.clear_credentials();
        self.user = None;
        self.persistence.remove(keys::AUTH_TOKEN);
        self.persistence.remove(keys::REFRESH_TOKEN);
        self.persistence.remove(keys::AUTH_USER);
    }
}
