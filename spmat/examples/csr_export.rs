//! Build a row-map matrix, walk its CSR arrays and multiply by ones

use spmat::{OrderedMapMatrix, SparseMatrix, SpmatError, ToCsr};

fn main() -> Result<(), SpmatError> {
    let n = 10;

    // Pre-size the rows, then fill a 4/-1 tridiagonal matrix
    let mut a = OrderedMapMatrix::<f64>::with_rows(n);
    for i in 0..n {
        if i > 0 {
            a.set(i, i - 1, -1.0);
        }
        if i < n - 1 {
            a.set(i, i + 1, -1.0);
        }
        a.set(i, i, 4.0);
    }

    println!("Loop through matrix entries:");
    a.for_each_entry(|i, j, v| println!("A[{i}][{j}] = {v}"));
    println!();

    let csr = a.to_csr()?;
    println!("CSR vectors:");
    println!("{:?}", csr.values);
    println!("{:?}", csr.column_indices);
    println!("{:?}", csr.row_offsets);
    println!();

    println!("Matrix entries from CSR:");
    for i in 0..csr.nrows {
        for k in csr.row_offsets[i]..csr.row_offsets[i + 1] {
            println!("A[{i}][{}] = {}", csr.column_indices[k], csr.values[k]);
        }
    }
    println!();

    println!("Matrix-vector product:");
    let ones = vec![1.0; n];
    let y = a.vmult(&ones)?;
    println!("{y:?}");
    Ok(())
}
