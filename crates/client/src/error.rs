use pasajes_core::fault::{user_facing_message, CONNECTION_FAILURE_MESSAGE};

/// Errors from the record store client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("Remote error ({status}): {message}")]
    Remote {
        status: u16,
        /// Structured error code from the `{error, code}` body, if any.
        code: Option<String>,
        message: String,
    },

    /// A success response whose body could not be decoded.
    #[error("Unexpected response body: {0}")]
    Decode(String),
}

impl ClientError {
    /// Text shown to the desk user for this failure.
    ///
    /// Known procedure faults get their friendly message; undecodable
    /// responses are reported like a lost connection.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Remote { code, message, .. } => {
                user_facing_message(code.as_deref(), message)
            }
            ClientError::Transport(_) | ClientError::Decode(_) => {
                CONNECTION_FAILURE_MESSAGE.to_string()
            }
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Transport(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn remote(code: Option<&str>, message: &str) -> ClientError {
        ClientError::Remote {
            status: 409,
            code: code.map(str::to_string),
            message: message.to_string(),
        }
    }

    #[test]
    fn structured_code_selects_friendly_message() {
        let err = remote(Some("SCHEDULE_CONFLICT"), "duplicate key");
        assert_eq!(err.user_message(), "⛔ Choque de horario: Asiento ya vendido.");
    }

    #[test]
    fn legacy_marker_without_code_is_recognised() {
        let err = remote(None, "ORA-20001: asiento fuera de rango");
        assert_eq!(err.user_message(), "⚠️ Capacidad excedida: El asiento no existe.");
    }

    #[test]
    fn other_messages_pass_through() {
        let err = remote(None, "La ruta está inactiva");
        assert_eq!(err.user_message(), "La ruta está inactiva");
    }

    #[test]
    fn empty_remote_message_is_unknown_error() {
        assert_eq!(remote(None, "").user_message(), "Error desconocido");
    }

    #[test]
    fn decode_failure_reads_as_connection_failure() {
        let err = ClientError::Decode("expected value".into());
        assert_eq!(err.user_message(), "Fallo de conexión");
        assert!(!err.is_transport());
    }
}
