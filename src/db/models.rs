use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct User {
    #[sqlx(rename = "id_usuario")]
    pub id: i32,
    #[sqlx(rename = "nome")]
    pub name: String,
    pub email: String,
    /// Stored and compared as plaintext.
    #[sqlx(rename = "senha")]
    pub password: String,
    #[sqlx(rename = "data_cadastro")]
    pub registered_at: DateTime<Utc>,
}

/// Writable fields of a user, shared by insert and update.
#[derive(Debug, Clone, Default)]
pub struct UserInput {
    pub name: String,
    pub email: String,
    pub password: String,
    /// `None` lets the database default (insert) or keep the stored value (update).
    pub registered_at: Option<DateTime<Utc>>,
}

// ---------------------------------------------------------------------------
// Device
// ---------------------------------------------------------------------------

/// Mirrors the `device_status` Postgres enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "device_status")]
pub enum DeviceStatus {
    #[sqlx(rename = "Ativo")]
    #[serde(rename = "Ativo")]
    Active,
    #[sqlx(rename = "Inativo")]
    #[serde(rename = "Inativo")]
    Inactive,
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DeviceStatus::Active => "Ativo",
            DeviceStatus::Inactive => "Inativo",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Device {
    #[sqlx(rename = "id_dispositivo")]
    pub id: i32,
    #[sqlx(rename = "nome_dispositivo")]
    pub name: String,
    #[sqlx(rename = "tipo_dispositivo")]
    pub kind: String,
    pub status: Option<DeviceStatus>,
    #[sqlx(rename = "data_cadastro")]
    pub registered_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct DeviceInput {
    pub name: String,
    pub kind: String,
    pub status: Option<DeviceStatus>,
    pub registered_at: Option<DateTime<Utc>>,
}

impl From<Device> for DeviceInput {
    fn from(d: Device) -> Self {
        Self {
            name: d.name,
            kind: d.kind,
            status: d.status,
            registered_at: Some(d.registered_at),
        }
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// A login session. `started_at` is set on start, `ended_at` on finalisation.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub id: i32,
    pub user_id: Option<i32>,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
    /// Resolved from `user_id`; `None` once the user has been deleted.
    pub user: Option<User>,
}

#[derive(Debug, Clone)]
pub struct NewSession {
    pub user_id: i32,
    pub started_at: DateTime<Utc>,
}

/// Flat shape of `tb_sessao LEFT JOIN tb_usuario`.
#[derive(Debug, FromRow)]
pub(crate) struct SessionRow {
    pub id_sessao: i32,
    pub id_usuario: Option<i32>,
    pub inicio_sessao: Option<DateTime<Utc>>,
    pub fim_sessao: Option<DateTime<Utc>>,
    pub usuario_id: Option<i32>,
    pub nome: Option<String>,
    pub email: Option<String>,
    pub senha: Option<String>,
    pub data_cadastro: Option<DateTime<Utc>>,
}

impl From<SessionRow> for Session {
    fn from(r: SessionRow) -> Self {
        let user = match (r.usuario_id, r.nome, r.email, r.senha, r.data_cadastro) {
            (Some(id), Some(name), Some(email), Some(password), Some(registered_at)) => Some(User {
                id,
                name,
                email,
                password,
                registered_at,
            }),
            _ => None,
        };

        Self {
            id: r.id_sessao,
            user_id: r.id_usuario,
            started_at: r.inicio_sessao,
            ended_at: r.fim_sessao,
            user,
        }
    }
}

// ---------------------------------------------------------------------------
// ConsumptionReading
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ConsumptionReading {
    #[sqlx(rename = "id_consumo")]
    pub id: i32,
    #[sqlx(rename = "data_hora")]
    pub recorded_at: DateTime<Utc>,
    /// kWh
    #[sqlx(rename = "consumo_energia")]
    pub energy: f64,
}

#[derive(Debug, Clone, Default)]
pub struct ConsumptionInput {
    pub energy: f64,
    pub recorded_at: Option<DateTime<Utc>>,
}
