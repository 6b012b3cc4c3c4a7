//! Account registration, login and profile management.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use atelier_auth::{IssuedToken, JwtEncoder, PasswordHasher};
use atelier_core::error::AppError;
use atelier_database::store::{CustomerStore, RetailerStore};
use atelier_entity::user::{
    CreateCustomer, CreateRetailer, Customer, Identity, Retailer, UpdateCustomer, UpdateRetailer,
    UserType,
};

use crate::context::RequestContext;

/// Shortest accepted password.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// The public face of an authenticated account.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
    pub user_type: UserType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
}

impl From<&Customer> for AuthUser {
    fn from(c: &Customer) -> Self {
        Self {
            id: c.id,
            email: c.email.clone(),
            user_type: UserType::Customer,
            name: Some(c.name.clone()),
            business_name: None,
        }
    }
}

impl From<&Retailer> for AuthUser {
    fn from(r: &Retailer) -> Self {
        Self {
            id: r.id,
            email: r.email.clone(),
            user_type: UserType::Retailer,
            name: Some(r.owner_name.clone()),
            business_name: Some(r.business_name.clone()),
        }
    }
}

/// Result of a login or registration.
#[derive(Debug, Clone)]
pub struct Session<T> {
    pub user: AuthUser,
    pub token: IssuedToken,
    pub account: T,
}

/// Customer sign-up data.
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
    pub password: String,
    pub contact_number: Option<String>,
    pub address: Option<String>,
}

/// Retailer sign-up data.
#[derive(Debug, Clone)]
pub struct NewRetailer {
    pub business_name: String,
    pub owner_name: String,
    pub email: String,
    pub password: String,
    pub contact_number: String,
    pub address: String,
    pub gst_number: Option<String>,
    pub pan_number: Option<String>,
}

/// Handles sign-up, login and self-service profile updates.
///
/// Tokens are stateless, so logging out is a client-side affair.
#[derive(Clone)]
pub struct AccountService {
    retailers: Arc<dyn RetailerStore>,
    customers: Arc<dyn CustomerStore>,
    hasher: Arc<PasswordHasher>,
    encoder: Arc<JwtEncoder>,
}

impl AccountService {
    /// Creates a new account service.
    pub fn new(
        retailers: Arc<dyn RetailerStore>,
        customers: Arc<dyn CustomerStore>,
        hasher: Arc<PasswordHasher>,
        encoder: Arc<JwtEncoder>,
    ) -> Self {
        Self {
            retailers,
            customers,
            hasher,
            encoder,
        }
    }

    /// Registers a customer and signs them in.
    pub async fn register_customer(
        &self,
        data: NewCustomer,
    ) -> Result<Session<Customer>, AppError> {
        require(&[("Name", &data.name), ("Email", &data.email), ("Password", &data.password)])?;
        let email = normalize_email(&data.email)?;
        check_password(&data.password)?;

        if self.customers.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("Email already registered"));
        }

        let customer = self
            .customers
            .create(CreateCustomer {
                name: data.name.trim().to_string(),
                email,
                password_hash: self.hasher.hash_password(&data.password)?,
                contact_number: non_blank(data.contact_number),
                address: non_blank(data.address),
            })
            .await?;

        info!(customer_id = %customer.id, "Customer registered");
        self.session(AuthUser::from(&customer), customer)
    }

    /// Registers a retailer and signs them in.
    pub async fn register_retailer(
        &self,
        data: NewRetailer,
    ) -> Result<Session<Retailer>, AppError> {
        require(&[
            ("Business name", &data.business_name),
            ("Owner name", &data.owner_name),
            ("Email", &data.email),
            ("Password", &data.password),
            ("Contact number", &data.contact_number),
            ("Address", &data.address),
        ])?;
        let email = normalize_email(&data.email)?;
        check_password(&data.password)?;

        if self.retailers.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("Email already registered"));
        }

        let retailer = self
            .retailers
            .create(CreateRetailer {
                business_name: data.business_name.trim().to_string(),
                owner_name: data.owner_name.trim().to_string(),
                email,
                password_hash: self.hasher.hash_password(&data.password)?,
                contact_number: data.contact_number,
                address: data.address,
                gst_number: non_blank(data.gst_number),
                pan_number: non_blank(data.pan_number),
            })
            .await?;

        info!(retailer_id = %retailer.id, "Retailer registered");
        self.session(AuthUser::from(&retailer), retailer)
    }

    /// Signs in a customer.
    pub async fn login_customer(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session<Customer>, AppError> {
        let customer = self
            .customers
            .find_by_email(&email.trim().to_lowercase())
            .await?;
        let customer = self.check_login(customer, |c| &c.password_hash, password)?;
        info!(customer_id = %customer.id, "Customer logged in");
        self.session(AuthUser::from(&customer), customer)
    }

    /// Signs in a retailer.
    pub async fn login_retailer(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session<Retailer>, AppError> {
        let retailer = self
            .retailers
            .find_by_email(&email.trim().to_lowercase())
            .await?;
        let retailer = self.check_login(retailer, |r| &r.password_hash, password)?;
        info!(retailer_id = %retailer.id, "Retailer logged in");
        self.session(AuthUser::from(&retailer), retailer)
    }

    /// The caller's account summary.
    pub async fn me(&self, ctx: &RequestContext) -> Result<AuthUser, AppError> {
        match ctx.user_type() {
            UserType::Customer => Ok(AuthUser::from(&self.customer(ctx, ctx.user_id()).await?)),
            UserType::Retailer => Ok(AuthUser::from(&self.retailer(ctx, ctx.user_id()).await?)),
        }
    }

    /// The caller's own customer profile.
    pub async fn customer(&self, ctx: &RequestContext, id: Uuid) -> Result<Customer, AppError> {
        ctx.ensure_is(Identity::customer(id))?;
        self.customers
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Customer not found"))
    }

    /// The caller's own retailer profile.
    pub async fn retailer(&self, ctx: &RequestContext, id: Uuid) -> Result<Retailer, AppError> {
        ctx.ensure_is(Identity::retailer(id))?;
        self.retailers
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Retailer not found"))
    }

    /// Updates the caller's customer profile.
    pub async fn update_customer(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        mut data: UpdateCustomer,
    ) -> Result<Customer, AppError> {
        ctx.ensure_is(Identity::customer(id))?;
        if data.is_empty() {
            return Err(AppError::validation("No fields to update"));
        }
        if let Some(email) = &data.email {
            data.email = Some(normalize_email(email)?);
        }

        let customer = self
            .customers
            .update(id, &data)
            .await?
            .ok_or_else(|| AppError::not_found("Customer not found"))?;
        info!(customer_id = %id, "Customer profile updated");
        Ok(customer)
    }

    /// Updates the caller's retailer profile.
    pub async fn update_retailer(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        mut data: UpdateRetailer,
    ) -> Result<Retailer, AppError> {
        ctx.ensure_is(Identity::retailer(id))?;
        if data.is_empty() {
            return Err(AppError::validation("No fields to update"));
        }
        if let Some(email) = &data.email {
            data.email = Some(normalize_email(email)?);
        }

        let retailer = self
            .retailers
            .update(id, &data)
            .await?
            .ok_or_else(|| AppError::not_found("Retailer not found"))?;
        info!(retailer_id = %id, "Retailer profile updated");
        Ok(retailer)
    }

    fn check_login<T>(
        &self,
        account: Option<T>,
        hash_of: impl Fn(&T) -> &String,
        password: &str,
    ) -> Result<T, AppError> {
        let Some(account) = account else {
            return Err(AppError::authentication("Invalid credentials"));
        };
        if !self.hasher.verify_password(password, hash_of(&account))? {
            warn!("Login rejected: wrong password");
            return Err(AppError::authentication("Invalid credentials"));
        }
        Ok(account)
    }

    fn session<T>(&self, user: AuthUser, account: T) -> Result<Session<T>, AppError> {
        let token = self
            .encoder
            .issue(Identity::new(user.id, user.user_type), &user.email)?;
        Ok(Session {
            user,
            token,
            account,
        })
    }
}

fn require(fields: &[(&str, &String)]) -> Result<(), AppError> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, v)| v.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::validation(format!("Required: {}", missing.join(", "))))
    }
}

fn normalize_email(email: &str) -> Result<String, AppError> {
    let email = email.trim().to_lowercase();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(email),
        _ => Err(AppError::validation("Invalid email format")),
    }
}

fn check_password(password: &str) -> Result<(), AppError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AppError::validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use atelier_core::ErrorKind;

    use super::*;
    use crate::testing::Fixture;

    fn meera() -> NewCustomer {
        NewCustomer {
            name: "Meera Shah".to_string(),
            email: "Meera@Example.com".to_string(),
            password: "sandalwood-42".to_string(),
            contact_number: None,
            address: Some(" ".to_string()),
        }
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let fx = Fixture::new();
        let service = fx.accounts();

        let registered = service.register_customer(meera()).await.unwrap();
        assert_eq!(registered.account.email, "meera@example.com");
        assert_eq!(registered.account.address, None);
        assert_eq!(registered.user.user_type, UserType::Customer);
        assert!(!registered.token.token.is_empty());

        let session = service
            .login_customer("MEERA@example.com", "sandalwood-42")
            .await
            .unwrap();
        assert_eq!(session.user.id, registered.account.id);

        let claims = fx.decoder().decode(&session.token.token).unwrap();
        assert_eq!(claims.identity(), Identity::customer(registered.account.id));
    }

    #[tokio::test]
    async fn test_register_rules() {
        let fx = Fixture::new();
        let service = fx.accounts();
        service.register_customer(meera()).await.unwrap();

        let duplicate = service.register_customer(meera()).await.unwrap_err();
        let mut short = meera();
        short.email = "other@example.com".to_string();
        short.password = "abc".to_string();
        let short = service.register_customer(short).await.unwrap_err();
        let mut nameless = meera();
        nameless.name = String::new();
        let nameless = service.register_customer(nameless).await.unwrap_err();

        assert_eq!(duplicate.kind, ErrorKind::Conflict);
        assert_eq!(short.kind, ErrorKind::Validation);
        assert_eq!(nameless.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_bad_login_is_unauthorized() {
        let fx = Fixture::new();
        let service = fx.accounts();
        service.register_customer(meera()).await.unwrap();

        let wrong = service
            .login_customer("meera@example.com", "not-the-password")
            .await
            .unwrap_err();
        let unknown = service
            .login_retailer("meera@example.com", "sandalwood-42")
            .await
            .unwrap_err();
        assert_eq!(wrong.kind, ErrorKind::Authentication);
        assert_eq!(unknown.kind, ErrorKind::Authentication);
    }

    #[tokio::test]
    async fn test_retailer_profile_is_private() {
        let fx = Fixture::new();
        let service = fx.accounts();
        let session = service
            .register_retailer(NewRetailer {
                business_name: "Casa Luce".to_string(),
                owner_name: "Ravi Menon".to_string(),
                email: "ravi@casaluce.in".to_string(),
                password: "terracotta-7".to_string(),
                contact_number: "+91 98200 00000".to_string(),
                address: "Kala Ghoda, Mumbai".to_string(),
                gst_number: None,
                pan_number: None,
            })
            .await
            .unwrap();
        let id = session.account.id;
        assert_eq!(session.user.business_name.as_deref(), Some("Casa Luce"));

        let own = fx.retailer(id);
        let updated = service
            .update_retailer(
                &own,
                id,
                UpdateRetailer {
                    about: Some("Lighting atelier".to_string()),
                    ..UpdateRetailer::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.about.as_deref(), Some("Lighting atelier"));

        let peek = service
            .retailer(&fx.retailer(Uuid::new_v4()), id)
            .await
            .unwrap_err();
        let empty = service
            .update_retailer(&own, id, UpdateRetailer::default())
            .await
            .unwrap_err();
        assert_eq!(peek.kind, ErrorKind::Authorization);
        assert_eq!(empty.kind, ErrorKind::Validation);
        assert_eq!(service.me(&own).await.unwrap().email, "ravi@casaluce.in");
    }
}
