use kusari_cli::prelude::*;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock CredentialStore keeping tokens in memory
#[derive(Default, Clone)]
pub struct MockCredentialStore {
    tokens: Arc<Mutex<HashMap<String, Token>>>,
}

impl MockCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(self, provider: &str, token: Token) -> Self {
        self.tokens
            .lock()
            .unwrap()
            .insert(provider.to_string(), token);
        self
    }

    pub fn stored(&self, provider: &str) -> Option<Token> {
        self.tokens.lock().unwrap().get(provider).cloned()
    }
}

impl CredentialStore for MockCredentialStore {
    fn save_token(&self, token: &Token, provider: &str) -> Result<()> {
        self.tokens
            .lock()
            .unwrap()
            .insert(provider.to_string(), token.clone());
        Ok(())
    }

    fn load_token(&self, provider: &str) -> Result<Option<Token>> {
        Ok(self.stored(provider))
    }

    fn clear_tokens(&self) -> Result<()> {
        self.tokens.lock().unwrap().clear();
        Ok(())
    }
}
