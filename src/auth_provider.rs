use async_trait::async_trait;

#[derive(Debug)]
pub struct Error {
    pub message: String
}

#[derive(Debug)]
pub enum Failure {
    Unauthorized,
    Error(Error)
}

#[async_trait]
pub trait AuthProvider {
    async fn login(
        &self,
        username: &str,
        password: &str
    ) -> Result<String, Failure>;
}

// A single username/password pair supplied by configuration
#[derive(Debug)]
pub struct FixedCredential {
    pub username: String,
    pub password: String
}

#[async_trait]
impl AuthProvider for FixedCredential {
    async fn login(
        &self,
        username: &str,
        password: &str
    ) -> Result<String, Failure>
    {
        // check both fields before deciding, so neither is singled out
        let username_ok = username == self.username;
        let password_ok = password == self.password;

        if username_ok && password_ok {
            Ok(self.username.clone())
        }
        else {
            Err(Failure::Unauthorized)
        }
    }
}
