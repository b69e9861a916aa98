//! CSV serialization of an aggregated export

use crate::error::{Error, Result};
use crate::formatting::{detail_link, position_label};
use crate::types::Formasi;
use std::io::Write;

/// Header row of every export
pub const CSV_HEADER: [&str; 9] = [
    "Organization",
    "Position",
    "JobTitle",
    "WorkUnit",
    "RequiredHeadcount",
    "Passing",
    "MinSalary",
    "MaxSalary",
    "Link",
];

/// File name offered to browsers downloading an export
pub const CSV_FILENAME: &str = "data_formasi.csv";

/// Write the header and one row per record, in the order given
///
/// Salaries are written as the raw digits the upstream sent so spreadsheets
/// read them as numbers.
pub fn write_csv<W: Write>(writer: W, records: &[Formasi], detail_base_url: &str) -> Result<W> {
    let mut csv_writer = ::csv::Writer::from_writer(writer);
    csv_writer.write_record(CSV_HEADER)?;

    for record in records {
        csv_writer.write_record([
            record.ins_nm.as_str(),
            position_label(record).as_str(),
            record.jabatan_nm.as_str(),
            record.lokasi_nm.as_str(),
            record.jumlah_formasi.to_string().as_str(),
            record.jumlah_ms.to_string().as_str(),
            record.gaji_min.as_str(),
            record.gaji_max.as_str(),
            detail_link(detail_base_url, record).as_str(),
        ])?;
    }

    csv_writer
        .into_inner()
        .map_err(|e| Error::Io(e.into_error()))
}

/// Render a complete CSV document in memory
pub fn to_csv(records: &[Formasi], detail_base_url: &str) -> Result<Vec<u8>> {
    write_csv(Vec::new(), records, detail_base_url)
}
