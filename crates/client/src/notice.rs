//! User-facing messages produced by desk operations.

use std::fmt;

pub const SAVED_TITLE: &str = "Guardado";
pub const UPDATED_TITLE: &str = "Actualizado";
pub const SAVE_SUCCESS_TEXT: &str = "Operación realizada con éxito";
pub const EDIT_MODE_TITLE: &str = "Modo Edición";
pub const RESELECT_TEXT: &str = "Selecciona nuevamente la Ruta, Unidad y Tipo.";
pub const PREFILLED_TEXT: &str = "Revisa la Ruta, Unidad y Tipo antes de actualizar.";
pub const STALE_EDIT_TEXT: &str = "El registro ya no existe, actualice la lista";
pub const DELETED_TITLE: &str = "Eliminado";
pub const DELETED_TEXT: &str = "El registro ha sido eliminado.";
pub const EXPORT_LOADING_TEXT: &str = "Generando reporte...";
pub const EXPORT_SUCCESS_TEXT: &str = "Reporte descargado";
pub const EXPORT_FAILED_TEXT: &str = "No se pudo generar el archivo";
pub const LOOKUPS_FAILED_TEXT: &str = "No se pudieron cargar las listas";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
    Loading,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: &'static str,
    pub text: String,
}

impl Notice {
    pub fn success(title: &'static str, text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            title,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: "Error",
            text: text.into(),
        }
    }

    pub fn info(title: &'static str, text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            title,
            text: text.into(),
        }
    }

    pub fn loading(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Loading,
            title: "",
            text: text.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = match self.kind {
            NoticeKind::Success => "[ok]",
            NoticeKind::Error => "[error]",
            NoticeKind::Info => "[info]",
            NoticeKind::Loading => "[...]",
        };
        if self.title.is_empty() {
            write!(f, "{marker} {}", self.text)
        } else {
            write!(f, "{marker} {}: {}", self.title, self.text)
        }
    }
}
