use qsign_core::repository::error::DataLayerError;
use sea_orm::{DbErr, SqlErr};

pub(crate) fn to_data_layer_error(e: DbErr) -> DataLayerError {
    if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
        return DataLayerError::AlreadyExists;
    }

    match e {
        DbErr::RecordNotUpdated => DataLayerError::RecordNotUpdated,
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => DataLayerError::Connection(e.into()),
        _ => DataLayerError::Db(e.into()),
    }
}
