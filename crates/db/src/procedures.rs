//! Names of the stored functions backing each store operation.

pub const LIST_TICKETS: &str = "spu_consultar_pasajes";
pub const LIST_TICKETS_BY_ROUTE: &str = "spu_consultar_pasajes_por_ruta";
pub const INSERT_TICKET: &str = "spu_insertar_pasaje";
pub const UPDATE_TICKET: &str = "spu_actualizar_pasaje";
pub const DELETE_TICKET: &str = "spu_eliminar_pasaje";
pub const EXPORT_TICKETS_CSV: &str = "spu_exportar_pasajes_csv";
pub const LIST_ROUTES: &str = "spu_listar_rutas";
pub const LIST_UNITS: &str = "spu_listar_unidades";
pub const LIST_FARE_TYPES: &str = "spu_listar_tipos_pasaje";

/// Columns selected from the listing functions, aliased to [`TicketRow`]
/// field names. Numeric and date columns are read as text.
///
/// [`TicketRow`]: crate::models::ticket::TicketRow
pub const TICKET_COLUMNS: &str = "id_pasaje AS id, ruta AS route_name, unidad AS unit_name, \
     tipo AS fare_type, cedula AS customer_id, nombre AS customer_name, \
     valor::text AS fare_value, fecha::text AS date, hora AS time, observacion AS observation";
