mod csv_export;

pub(crate) use csv_export::export_csv;
