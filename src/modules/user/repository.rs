use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;
use std::str::FromStr;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub enum Role {
    #[serde(rename = "ADMIN")]
    Admin,
    #[serde(rename = "SELLER")]
    Seller,
    #[serde(rename = "CUSTOMER")]
    Customer,
}

impl ToString for Role {
    fn to_string(&self) -> String {
        match self {
            Role::Admin => String::from("ADMIN"),
            Role::Seller => String::from("SELLER"),
            Role::Customer => String::from("CUSTOMER"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Role::Admin),
            "SELLER" => Ok(Role::Seller),
            "CUSTOMER" => Ok(Role::Customer),
            _ => Err(format!("'{}' is not a valid Role", s)),
        }
    }
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        s.parse().unwrap_or_else(|_| {
            tracing::warn!("Unknown role '{}', treating as CUSTOMER", s);
            Role::Customer
        })
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct User {
    pub id: String,
    pub email: String,
    pub phone_number: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub status: String,
    pub company_name: Option<String>,
    pub brand_name: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

impl User {
    /// Human-readable label with the fallback chain used everywhere a
    /// seller or customer is shown: personal name, then brand, then
    /// company, then email, then phone, then the raw id.
    pub fn display_name(&self) -> String {
        let full_name = format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string();
        if !full_name.is_empty() {
            return full_name;
        }

        for candidate in [&self.brand_name, &self.company_name] {
            if let Some(value) = candidate {
                let value = value.trim();
                if !value.is_empty() {
                    return value.to_string();
                }
            }
        }

        if !self.email.trim().is_empty() {
            return self.email.trim().to_string();
        }

        if !self.phone_number.trim().is_empty() {
            return self.phone_number.trim().to_string();
        }

        self.id.clone()
    }
}

pub fn is_admin(user: &User) -> bool {
    user.role == Role::Admin
}

pub fn is_seller(user: &User) -> bool {
    user.role == Role::Seller
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: String,
    email: String,
    phone_number: String,
    first_name: String,
    last_name: String,
    role: String,
    status: String,
    company_name: Option<String>,
    brand_name: Option<String>,
    created_at: NaiveDateTime,
    updated_at: Option<NaiveDateTime>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            email: row.email,
            phone_number: row.phone_number,
            first_name: row.first_name,
            last_name: row.last_name,
            role: Role::from(row.role),
            status: row.status,
            company_name: row.company_name,
            brand_name: row.brand_name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

const USER_COLUMNS: &str = "id, email, phone_number, first_name, last_name, role, status, \
     company_name, brand_name, created_at, updated_at";

pub async fn find_by_id<'e, E: PgExecutor<'e>>(e: E, id: String) -> Result<Option<User>, Error> {
    sqlx::query_as::<_, UserRow>(&format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS))
        .bind(id)
        .fetch_optional(e)
        .await
        .map(|row| row.map(User::from))
        .map_err(|err| {
            tracing::error!("Error occurred while trying to fetch user by id: {}", err);
            Error::UnexpectedError
        })
}

pub async fn find_by_ids<'e, E: PgExecutor<'e>>(e: E, ids: &[String]) -> Result<Vec<User>, Error> {
    if ids.is_empty() {
        return Ok(vec![]);
    }

    sqlx::query_as::<_, UserRow>(&format!(
        "SELECT {} FROM users WHERE id = ANY($1)",
        USER_COLUMNS
    ))
    .bind(ids)
    .fetch_all(e)
    .await
    .map(|rows| rows.into_iter().map(User::from).collect())
    .map_err(|err| {
        tracing::error!("Error occurred while trying to fetch users by ids: {}", err);
        Error::UnexpectedError
    })
}

pub async fn find_sellers<'e, E: PgExecutor<'e>>(e: E) -> Result<Vec<User>, Error> {
    sqlx::query_as::<_, UserRow>(&format!(
        "SELECT {} FROM users WHERE role = 'SELLER' ORDER BY created_at",
        USER_COLUMNS
    ))
    .fetch_all(e)
    .await
    .map(|rows| rows.into_iter().map(User::from).collect())
    .map_err(|err| {
        tracing::error!("Error occurred while trying to fetch sellers: {}", err);
        Error::UnexpectedError
    })
}
