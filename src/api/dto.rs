use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::db::models::{
    ConsumptionInput, ConsumptionReading, Device, DeviceInput, DeviceStatus, Session, User,
    UserInput,
};

// Request bodies default missing fields so that the business objects, not the
// JSON extractor, decide what is invalid. Any id inside a body is ignored;
// the path id is authoritative.

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// A user as returned by the API. The password is never serialised.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id_usuario: i32,
    pub nome: String,
    pub email: String,
    pub data_cadastro: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        Self {
            id_usuario: u.id,
            nome: u.name,
            email: u.email,
            data_cadastro: u.registered_at,
        }
    }
}

/// Request body for `POST /usuarios` and `PUT /usuarios/{id}`.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct UserPayload {
    pub nome: String,
    pub email: String,
    pub senha: String,
    pub data_cadastro: Option<DateTime<Utc>>,
}

impl From<UserPayload> for UserInput {
    fn from(p: UserPayload) -> Self {
        Self {
            name: p.nome,
            email: p.email,
            password: p.senha,
            registered_at: p.data_cadastro,
        }
    }
}

/// Request body for `POST /usuarios/login`.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub senha: String,
}

// ---------------------------------------------------------------------------
// Devices
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeviceDto {
    pub id_dispositivo: i32,
    pub nome_dispositivo: String,
    pub tipo_dispositivo: String,
    /// `"Ativo"`, `"Inativo"` or `null` when never set.
    pub status: Option<DeviceStatus>,
    pub data_cadastro: DateTime<Utc>,
}

impl From<Device> for DeviceDto {
    fn from(d: Device) -> Self {
        Self {
            id_dispositivo: d.id,
            nome_dispositivo: d.name,
            tipo_dispositivo: d.kind,
            status: d.status,
            data_cadastro: d.registered_at,
        }
    }
}

/// Request body for `POST /dispositivos` and `PUT /dispositivos/{id}`.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct DevicePayload {
    pub nome_dispositivo: String,
    pub tipo_dispositivo: String,
    pub status: Option<DeviceStatus>,
    pub data_cadastro: Option<DateTime<Utc>>,
}

impl From<DevicePayload> for DeviceInput {
    fn from(p: DevicePayload) -> Self {
        Self {
            name: p.nome_dispositivo,
            kind: p.tipo_dispositivo,
            status: p.status,
            registered_at: p.data_cadastro,
        }
    }
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SessionDto {
    pub id_sessao: i32,
    pub inicio_sessao: Option<DateTime<Utc>>,
    pub fim_sessao: Option<DateTime<Utc>>,
    /// `null` once the referenced user has been deleted.
    pub usuario: Option<UserDto>,
}

impl From<Session> for SessionDto {
    fn from(s: Session) -> Self {
        Self {
            id_sessao: s.id,
            inicio_sessao: s.started_at,
            fim_sessao: s.ended_at,
            usuario: s.user.map(Into::into),
        }
    }
}

/// Reference to an existing user inside a session body.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct UserRef {
    pub id_usuario: Option<i32>,
}

/// Request body for `POST /sessoes`: `{"usuario": {"id_usuario": 1}}`.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct SessionPayload {
    pub usuario: Option<UserRef>,
}

impl SessionPayload {
    pub fn user_id(&self) -> Option<i32> {
        self.usuario.as_ref().and_then(|u| u.id_usuario)
    }
}

// ---------------------------------------------------------------------------
// Consumption readings
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ConsumptionDto {
    pub id_consumo: i32,
    pub data_hora: DateTime<Utc>,
    /// kWh
    pub consumo_energia: f64,
}

impl From<ConsumptionReading> for ConsumptionDto {
    fn from(r: ConsumptionReading) -> Self {
        Self {
            id_consumo: r.id,
            data_hora: r.recorded_at,
            consumo_energia: r.energy,
        }
    }
}

/// Request body for `POST /dadosConsumo` and `PUT /dadosConsumo/{id}`.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct ConsumptionPayload {
    pub consumo_energia: f64,
    pub data_hora: Option<DateTime<Utc>>,
}

impl From<ConsumptionPayload> for ConsumptionInput {
    fn from(p: ConsumptionPayload) -> Self {
        Self {
            energy: p.consumo_energia,
            recorded_at: p.data_hora,
        }
    }
}
