//! Handoff of matrices to external consumers
//!
//! Text dumps go to any [`std::io::Write`]; CSR snapshots are written as
//! JSON or as raw native-endian arrays.

use std::io::Write;

use spmat_core::{CsrMatrix, SparseMatrix};
use tracing::debug;

use crate::error::Result;

/// Write the deterministic row-then-column dump of `m` to `out`
pub fn write_dump<M: SparseMatrix, W: Write>(m: &M, out: &mut W) -> Result<()> {
    let mut text = String::new();
    m.print(&mut text)?;
    out.write_all(text.as_bytes())?;
    debug!(
        nrows = m.nrows(),
        nnz = m.nnz(),
        bytes = text.len(),
        "matrix dump written"
    );
    Ok(())
}

/// Write the three CSR arrays back to back as raw bytes
///
/// Order is values, column indices, row offsets. Returns the number of
/// bytes written.
pub fn write_csr_bytes<T: bytemuck::Pod, W: Write>(csr: &CsrMatrix<T>, out: &mut W) -> Result<usize> {
    let (values, cols, offsets) = csr.as_byte_parts();
    out.write_all(values)?;
    out.write_all(cols)?;
    out.write_all(offsets)?;
    let written = values.len() + cols.len() + offsets.len();
    debug!(nnz = csr.nnz(), bytes = written, "CSR arrays written");
    Ok(written)
}

/// Encode a CSR snapshot as a JSON document
#[cfg(feature = "serde")]
pub fn csr_to_json<T: serde::Serialize>(csr: &CsrMatrix<T>) -> Result<String> {
    let json = serde_json::to_string(csr)?;
    debug!(nnz = csr.nnz(), bytes = json.len(), "CSR encoded as JSON");
    Ok(json)
}

/// Write a CSR snapshot as pretty JSON and flush `out`
#[cfg(feature = "serde")]
pub fn write_csr_json<T: serde::Serialize, W: Write>(csr: &CsrMatrix<T>, mut out: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut out, csr)?;
    out.flush()?;
    debug!(nnz = csr.nnz(), "CSR written as JSON");
    Ok(())
}

/// Decode a CSR snapshot and validate its layout
#[cfg(feature = "serde")]
pub fn csr_from_json<T: serde::de::DeserializeOwned>(json: &str) -> Result<CsrMatrix<T>> {
    let raw: CsrMatrix<T> = serde_json::from_str(json)?;
    let csr = CsrMatrix::from_parts(
        raw.nrows,
        raw.ncols,
        raw.row_offsets,
        raw.column_indices,
        raw.values,
        true,
    )?;
    Ok(csr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LabError;
    use spmat_core::{Matrix, MatrixElement, OrderedMapMatrix, StorageKind, ToCsr};
    use std::fmt;
    use std::io::{self, BufWriter};
    use std::ops::{Add, AddAssign, Mul};

    /// Writer that rejects every write and flush
    struct Rejecting;

    impl Write for Rejecting {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "device full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::Other, "device full"))
        }
    }

    /// Element whose `Display` always fails
    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Unprintable(f64);

    impl fmt::Display for Unprintable {
        fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
            Err(fmt::Error)
        }
    }

    impl Add for Unprintable {
        type Output = Self;
        fn add(self, rhs: Self) -> Self {
            Unprintable(self.0 + rhs.0)
        }
    }

    impl AddAssign for Unprintable {
        fn add_assign(&mut self, rhs: Self) {
            self.0 += rhs.0;
        }
    }

    impl Mul for Unprintable {
        type Output = Self;
        fn mul(self, rhs: Self) -> Self {
            Unprintable(self.0 * rhs.0)
        }
    }

    impl MatrixElement for Unprintable {
        fn zero() -> Self {
            Unprintable(0.0)
        }
        fn one() -> Self {
            Unprintable(1.0)
        }
        fn from_f64(value: f64) -> Self {
            Unprintable(value)
        }
        fn to_f64(self) -> f64 {
            self.0
        }
    }

    fn sample() -> Matrix<f64> {
        let mut m = Matrix::new(StorageKind::UnsortedCoo);
        m.set(1, 2, 1.5);
        m.set(0, 0, -1.0);
        m
    }

    #[test]
    fn test_write_dump() {
        let mut out = Vec::new();
        write_dump(&sample(), &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "nrows: 2 | ncols: 3 | nnz: 2\n0,0,-1\n1,2,1.5\n"
        );
    }

    #[test]
    fn test_write_dump_reports_format_error() {
        let mut m = OrderedMapMatrix::<Unprintable>::new();
        m.set(0, 0, Unprintable(2.0));
        let mut out = Vec::new();
        assert!(matches!(write_dump(&m, &mut out), Err(LabError::Fmt(_))));
        assert!(out.is_empty());
    }

    #[test]
    fn test_write_dump_reports_io_error() {
        assert!(matches!(
            write_dump(&sample(), &mut Rejecting),
            Err(LabError::Io(_))
        ));
    }

    #[test]
    fn test_write_csr_bytes() {
        let csr = sample().to_csr().unwrap();
        let mut out = Vec::new();
        let written = write_csr_bytes(&csr, &mut out).unwrap();
        assert_eq!(written, out.len());
        assert_eq!(written, 2 * 8 + 2 * std::mem::size_of::<usize>() + 3 * std::mem::size_of::<usize>());
        assert_eq!(&out[..8], &(-1.0f64).to_ne_bytes());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_round_trip() {
        let csr = sample().to_csr().unwrap();
        let json = csr_to_json(&csr).unwrap();
        assert!(json.contains("\"row_offsets\":[0,1,2]"));
        let back: CsrMatrix<f64> = csr_from_json(&json).unwrap();
        assert_eq!(back, csr);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_write_csr_json_surfaces_buffered_failure() {
        let csr = sample().to_csr().unwrap();
        let result = write_csr_json(&csr, BufWriter::new(Rejecting));
        assert!(matches!(result, Err(LabError::Io(_))));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_write_csr_json_to_buffer() {
        let csr = sample().to_csr().unwrap();
        let mut out = Vec::new();
        write_csr_json(&csr, &mut out).unwrap();
        let back: CsrMatrix<f64> = csr_from_json(std::str::from_utf8(&out).unwrap()).unwrap();
        assert_eq!(back, csr);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_rejects_bad_layout() {
        let json = r#"{"nrows":1,"ncols":2,"row_offsets":[0,2],"column_indices":[1,0],"values":[1.0,2.0]}"#;
        assert!(csr_from_json::<f64>(json).is_err());
    }
}
