//! The message registry: HTTP status code -> category -> display text.
//!
//! A single immutable table, built at compile time and shared by every
//! request without locking. Lookup by category scans the status buckets;
//! the table holds tens of entries so a scan is cheaper than maintaining an
//! inverse index.

use thiserror::Error;

use super::category::MessageCategory;

/// All categories answered with one HTTP status code.
#[derive(Debug)]
pub struct StatusBucket {
    pub status: u16,
    pub messages: &'static [(MessageCategory, &'static str)],
}

/// A category's owning status code and its text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved {
    pub status: u16,
    pub text: &'static str,
}

impl Resolved {
    /// Responses below 400 are successes.
    pub fn is_success(&self) -> bool {
        self.status < 400
    }
}

/// Registry misconfiguration. Never expected at runtime once
/// [`validate`] has passed at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("category \"{0}\" not found in any status code")]
    Unregistered(MessageCategory),

    #[error("unknown message category: \"{0}\"")]
    UnknownCategory(String),

    #[error("category \"{category}\" registered under both {first} and {second}")]
    Duplicate {
        category: MessageCategory,
        first: u16,
        second: u16,
    },
}

pub static MESSAGES: &[StatusBucket] = &[
    StatusBucket {
        status: 200,
        messages: &[
            (MessageCategory::AuthLogin, "Inicio de sesión exitoso"),
            (MessageCategory::AuthProfileRetrieved, "Perfil obtenido correctamente"),
            (MessageCategory::AuthProfileUpdated, "Perfil actualizado correctamente"),
            (MessageCategory::AppWelcome, "API de Reservas de Piscina"),
            (MessageCategory::UserListRetrieved, "Lista de usuarios obtenida correctamente"),
            (MessageCategory::UserRetrieved, "Usuario obtenido correctamente"),
            (MessageCategory::ScheduleListRetrieved, "Horarios obtenidos correctamente"),
            (MessageCategory::ScheduleRetrieved, "Horario obtenido correctamente"),
            (MessageCategory::ScheduleUpdated, "Horario actualizado correctamente"),
            (MessageCategory::ScheduleDeleted, "Horario eliminado correctamente"),
            (MessageCategory::ScheduleDeactivated, "Horario desactivado correctamente. No se eliminó completamente debido a que tiene reservas asociadas."),
            (MessageCategory::ScheduleAvailabilityRetrieved, "Disponibilidad obtenida correctamente"),
            (MessageCategory::ReservationListRetrieved, "Reservas obtenidas correctamente"),
            (MessageCategory::ReservationRetrieved, "Reserva obtenida correctamente"),
            (MessageCategory::ReservationCancelled, "Reserva cancelada correctamente"),
            (MessageCategory::ReservationPaymentConfirmed, "Pago confirmado correctamente"),
            (MessageCategory::ReservationCompleted, "Reserva marcada como completada"),
        ],
    },
    StatusBucket {
        status: 201,
        messages: &[
            (MessageCategory::AuthRegister, "Usuario registrado correctamente"),
            (MessageCategory::ReservationCreated, "Reserva creada correctamente"),
            (MessageCategory::UserCreated, "Usuario creado correctamente"),
            (MessageCategory::ScheduleCreated, "Horario creado correctamente"),
        ],
    },
    StatusBucket {
        status: 400,
        messages: &[
            (MessageCategory::AuthMissingCredentials, "Por favor proporciona email y contraseña"),
            (MessageCategory::AuthMissingRegisterData, "Por favor proporciona email, contraseña y nombre"),
            (MessageCategory::AuthEmailAlreadyExists, "Este email ya está registrado"),
            (MessageCategory::AuthMissingCurrentPassword, "Debes proporcionar tu contraseña actual"),
            (MessageCategory::UserMissingRequiredFields, "Email, contraseña y nombre son requeridos"),
            (MessageCategory::UserEmailAlreadyExists, "Este email ya está registrado"),
            (MessageCategory::UserInvalidId, "ID de usuario inválido"),
            (MessageCategory::ScheduleMissingRequiredFields, "Por favor proporciona todos los campos requeridos: día de la semana, hora de inicio, hora de fin, capacidad máxima y número de carriles"),
            (MessageCategory::ScheduleInvalidData, "Datos de horario inválidos"),
            (MessageCategory::ScheduleInvalidId, "ID de horario inválido"),
            (MessageCategory::ScheduleMissingAvailabilityParams, "Por favor proporciona el ID del horario y la fecha"),
            (MessageCategory::ReservationMissingData, "Por favor proporciona el ID del horario y la fecha"),
            (MessageCategory::ReservationInvalidId, "ID de reserva inválido"),
            (MessageCategory::ReservationInvalidDate, "Fecha inválida"),
            (MessageCategory::ReservationInvalidStatus, "Estado de reserva inválido"),
            (MessageCategory::ReservationScheduleUnavailable, "Este horario no está disponible"),
            (MessageCategory::ReservationNoCapacity, "No hay cupos disponibles para este horario en la fecha seleccionada"),
            (MessageCategory::ReservationAlreadyExists, "Ya tienes una reserva para este horario en la fecha seleccionada"),
            (MessageCategory::ReservationAlreadyCompleted, "No se puede cancelar una reserva ya completada"),
            (MessageCategory::ReservationMissingPaymentData, "Por favor proporciona el monto y método de pago"),
            (MessageCategory::ReservationPaymentCancelled, "No se puede confirmar el pago de una reserva cancelada"),
            (MessageCategory::ReservationCompleteCancelled, "No se puede completar una reserva cancelada"),
            (MessageCategory::AppInvalidBody, "El cuerpo de la solicitud no es válido"),
        ],
    },
    StatusBucket {
        status: 401,
        messages: &[
            (MessageCategory::AuthNotAuthenticated, "No estás autenticado"),
            (MessageCategory::AuthNotAuthorized, "No estás autorizado para acceder a este recurso"),
            (MessageCategory::AuthTokenInvalid, "Token inválido o expirado"),
            (MessageCategory::AuthInvalidCredentials, "Credenciales inválidas"),
            (MessageCategory::AuthAccountDisabled, "Tu cuenta está desactivada. Por favor contacta al administrador."),
            (MessageCategory::AuthWrongCurrentPassword, "Contraseña actual incorrecta"),
        ],
    },
    StatusBucket {
        status: 403,
        messages: &[
            (MessageCategory::AuthInsufficientPermissions, "No tienes permiso para realizar esta acción"),
            (MessageCategory::ReservationViewForbidden, "No tienes permiso para ver esta reserva"),
            (MessageCategory::ReservationCancelForbidden, "No tienes permiso para cancelar esta reserva"),
        ],
    },
    StatusBucket {
        status: 404,
        messages: &[
            (MessageCategory::AuthUserNotFound, "Usuario no encontrado"),
            (MessageCategory::UserNotFound, "Usuario no encontrado"),
            (MessageCategory::ScheduleNotFound, "Horario no encontrado"),
            (MessageCategory::ReservationNotFound, "Reserva no encontrada"),
            (MessageCategory::AppRouteNotFound, "Ruta no encontrada"),
        ],
    },
    StatusBucket {
        status: 500,
        messages: &[
            (MessageCategory::AuthRegisterError, "Error al registrar usuario"),
            (MessageCategory::AuthLoginError, "Error al iniciar sesión"),
            (MessageCategory::AuthProfileError, "Error al obtener información del perfil"),
            (MessageCategory::AuthUpdateError, "Error al actualizar perfil"),
            (MessageCategory::UserFetchError, "Error al obtener usuarios"),
            (MessageCategory::UserCreateError, "Error al crear usuario"),
            (MessageCategory::ScheduleFetchError, "Error al obtener horarios de natación"),
            (MessageCategory::ScheduleCreateError, "Error al crear horario de natación"),
            (MessageCategory::ScheduleUpdateError, "Error al actualizar horario de natación"),
            (MessageCategory::ScheduleDeleteError, "Error al eliminar horario de natación"),
            (MessageCategory::ScheduleAvailabilityError, "Error al verificar disponibilidad del horario"),
            (MessageCategory::ReservationFetchError, "Error al obtener reservas"),
            (MessageCategory::ReservationCreateError, "Error al crear reserva"),
            (MessageCategory::ReservationCancelError, "Error al cancelar reserva"),
            (MessageCategory::ReservationPaymentError, "Error al confirmar pago de la reserva"),
            (MessageCategory::ReservationCompleteError, "Error al marcar reserva como completada"),
            (MessageCategory::AppInternalError, "Error interno del servidor"),
        ],
    },
];

/// Find the status code and text registered for `category`.
pub fn resolve(category: MessageCategory) -> Result<Resolved, RegistryError> {
    MESSAGES
        .iter()
        .find_map(|bucket| {
            bucket
                .messages
                .iter()
                .find(|(registered, _)| *registered == category)
                .map(|(_, text)| Resolved {
                    status: bucket.status,
                    text: *text,
                })
        })
        .ok_or(RegistryError::Unregistered(category))
}

/// Resolve a category given by its string key, e.g. `"AUTH_LOGIN"`.
pub fn resolve_key(key: &str) -> Result<Resolved, RegistryError> {
    let category: MessageCategory = key
        .parse()
        .map_err(|_| RegistryError::UnknownCategory(key.to_string()))?;
    resolve(category)
}

/// Iterate every registered `(status, category, text)` triple in table order.
pub fn entries() -> impl Iterator<Item = (u16, MessageCategory, &'static str)> {
    MESSAGES.iter().flat_map(|bucket| {
        bucket
            .messages
            .iter()
            .map(move |(category, text)| (bucket.status, *category, *text))
    })
}

/// Check that every category is registered under exactly one status code.
pub fn validate() -> Result<(), RegistryError> {
    for category in MessageCategory::ALL {
        let mut owners = MESSAGES.iter().filter(|bucket| {
            bucket
                .messages
                .iter()
                .any(|(registered, _)| registered == category)
        });

        let first = owners
            .next()
            .ok_or(RegistryError::Unregistered(*category))?;

        if let Some(second) = owners.next() {
            return Err(RegistryError::Duplicate {
                category: *category,
                first: first.status,
                second: second.status,
            });
        }

        let occurrences = first
            .messages
            .iter()
            .filter(|(registered, _)| registered == category)
            .count();
        if occurrences > 1 {
            return Err(RegistryError::Duplicate {
                category: *category,
                first: first.status,
                second: first.status,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_is_valid() {
        validate().unwrap();
    }

    #[test]
    fn test_every_category_resolves() {
        for category in MessageCategory::ALL {
            let resolved = resolve(*category).unwrap();
            assert!(!resolved.text.is_empty(), "{category} has empty text");
        }
    }

    #[test]
    fn test_every_entry_is_a_known_category() {
        let count = entries().count();
        assert_eq!(count, MessageCategory::ALL.len());
    }

    #[test]
    fn test_success_iff_below_400() {
        for (status, category, _) in entries() {
            let resolved = resolve(category).unwrap();
            assert_eq!(resolved.status, status);
            assert_eq!(resolved.is_success(), status < 400, "{category}");
        }
    }

    #[test]
    fn test_status_codes_are_the_known_set() {
        let known = [200, 201, 400, 401, 403, 404, 500];
        for bucket in MESSAGES {
            assert!(known.contains(&bucket.status), "unexpected status {}", bucket.status);
        }
    }

    #[test]
    fn test_resolve_auth_login() {
        let resolved = resolve(MessageCategory::AuthLogin).unwrap();
        assert_eq!(resolved.status, 200);
        assert_eq!(resolved.text, "Inicio de sesión exitoso");
    }

    #[test]
    fn test_resolve_email_already_exists() {
        let resolved = resolve(MessageCategory::AuthEmailAlreadyExists).unwrap();
        assert_eq!(resolved.status, 400);
        assert_eq!(resolved.text, "Este email ya está registrado");
        assert!(!resolved.is_success());
    }

    #[test]
    fn test_resolve_key() {
        let resolved = resolve_key("RESERVATION_CREATED").unwrap();
        assert_eq!(resolved.status, 201);

        let err = resolve_key("RESERVATION_TELEPORTED").unwrap_err();
        assert_eq!(
            err,
            RegistryError::UnknownCategory("RESERVATION_TELEPORTED".to_string())
        );
    }

    #[test]
    fn test_internal_errors_are_500() {
        for category in [
            MessageCategory::AuthLoginError,
            MessageCategory::ScheduleFetchError,
            MessageCategory::ReservationPaymentError,
            MessageCategory::AppInternalError,
        ] {
            assert_eq!(resolve(category).unwrap().status, 500);
        }
    }
}
