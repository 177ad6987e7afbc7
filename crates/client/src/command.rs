//! Line commands understood by the `pasajes-desk` terminal.

use std::path::PathBuf;

use pasajes_core::edit_session::FormField;
use pasajes_core::error::CoreError;
use pasajes_core::filter::RouteFilter;
use pasajes_core::types::DbId;

pub const HELP: &str = "\
Comandos:
  todas                  ver todos los registros
  ruta <id>              filtrar por ruta (ruta todas = sin filtro)
  pag <n> | sig | ant    cambiar de página
  editar <id>            editar el pasaje con ese ID
  cancelar               salir del modo edición
  campo <nombre> <valor> llenar un campo del formulario
                         (ruta unidad tipo cedula nombre valor fecha hora asiento obs)
  guardar                guardar o actualizar el formulario
  eliminar <id>          eliminar un pasaje (pide confirmación)
  exportar [dir]         descargar Reporte.csv (por defecto en el directorio actual)
  listas                 ver rutas, unidades y tipos
  ayuda                  esta ayuda
  salir                  terminar";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Re-render without changing anything (empty line).
    Show,
    Filter(RouteFilter),
    Page(usize),
    Next,
    Prev,
    Edit(DbId),
    Cancel,
    Field(FormField, String),
    Save,
    Delete(DbId),
    Export(Option<PathBuf>),
    Lookups,
    Help,
    Quit,
}

fn id_arg(command: &str, arg: Option<&str>) -> Result<DbId, String> {
    let arg = arg.ok_or_else(|| format!("Uso: {command} <id>"))?;
    arg.parse().map_err(|_| format!("ID inválido '{arg}'"))
}

/// Parse one input line.
pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let arg = Some(rest).filter(|r| !r.is_empty());

    match word.to_lowercase().as_str() {
        "" => Ok(Command::Show),
        "todas" => Ok(Command::Filter(RouteFilter::All)),
        "ruta" => {
            let arg = arg.ok_or_else(|| "Uso: ruta <id>".to_string())?;
            arg.parse().map(Command::Filter).map_err(|e| e.to_string())
        }
        "pag" => {
            let arg = arg.ok_or_else(|| "Uso: pag <n>".to_string())?;
            arg.parse()
                .map(Command::Page)
                .map_err(|_| format!("Página inválida '{arg}'"))
        }
        "sig" => Ok(Command::Next),
        "ant" => Ok(Command::Prev),
        "editar" => id_arg("editar", arg).map(Command::Edit),
        "cancelar" => Ok(Command::Cancel),
        "campo" => {
            let (name, value) = match rest.split_once(char::is_whitespace) {
                Some((name, value)) => (name, value.trim()),
                None => (rest, ""),
            };
            if name.is_empty() {
                return Err("Uso: campo <nombre> <valor>".to_string());
            }
            let field: FormField = name.parse().map_err(|e: CoreError| e.to_string())?;
            Ok(Command::Field(field, value.to_string()))
        }
        "guardar" => Ok(Command::Save),
        "eliminar" => id_arg("eliminar", arg).map(Command::Delete),
        "exportar" => Ok(Command::Export(arg.map(PathBuf::from))),
        "listas" => Ok(Command::Lookups),
        "ayuda" | "?" => Ok(Command::Help),
        "salir" => Ok(Command::Quit),
        other => Err(format!("Comando desconocido '{other}', escriba 'ayuda'")),
    }
}
