//! End-to-end tests for rustycdm-io: section writes and reads against real
//! files, memory-mapped files, classic record variables, and parallel reads.

use rustycdm_io::classic::{ClassicFile, ClassicVariable, NcType, VariableStorage};
use rustycdm_io::{
    read_section, read_section_with, write_section, BorrowedSource, ByteSource, DefaultProfiler,
    FileSource, Layout, MemorySource, ReadOptions, Selection,
};

fn f32s(raw: &[u8]) -> Vec<f32> {
    raw.chunks_exact(4)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect()
}

fn f32_bytes(values: &[f32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

/// 6x8 f32 grid where element (i, j) holds `i * 100 + j`.
fn grid_values() -> Vec<f32> {
    (0..6)
        .flat_map(|i| (0..8).map(move |j| (i * 100 + j) as f32))
        .collect()
}

// ---------------------------------------------------------------------------
// 1. File round trip
// ---------------------------------------------------------------------------

#[test]
fn file_write_then_read_sections() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("grid.bin");
    let header = 64u64;
    let layout = Layout::new(&[6, 8], 4).with_base_offset(header);

    {
        let mut sink = FileSource::create(&path, header + 6 * 8 * 4).unwrap();
        write_section(&mut sink, &layout, &Selection::full(&[6, 8]), &f32_bytes(&grid_values()))
            .unwrap();
        // overwrite every other column of rows 1..=3 with negatives
        let sel = Selection::parse("1:3,0:7:2", &[6, 8]).unwrap();
        let patch: Vec<f32> = (0..12).map(|k| -(k as f32) - 1.0).collect();
        write_section(&mut sink, &layout, &sel, &f32_bytes(&patch)).unwrap();
        sink.sync().unwrap();
    }

    let src = FileSource::open(&path).unwrap();
    assert_eq!(src.len(), header + 192);

    let row2 = read_section(&src, &layout, &Selection::parse("2,:", &[6, 8]).unwrap()).unwrap();
    assert_eq!(
        f32s(&row2),
        vec![-5.0, 201.0, -6.0, 203.0, -7.0, 205.0, -8.0, 207.0]
    );

    let untouched =
        read_section(&src, &layout, &Selection::parse("4:5,:", &[6, 8]).unwrap()).unwrap();
    assert_eq!(f32s(&untouched), grid_values()[32..].to_vec());

    // header bytes were never written
    let mut head = [0xffu8; 64];
    src.read_at(0, &mut head).unwrap();
    assert!(head.iter().all(|&b| b == 0));
}

#[test]
fn file_read_past_end_is_out_of_bounds() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("short.bin");
    std::fs::write(&path, vec![0u8; 100]).unwrap();

    let src = FileSource::open(&path).unwrap();
    let layout = Layout::new(&[6, 8], 4);
    let err = read_section(&src, &layout, &Selection::full(&[6, 8])).unwrap_err();
    assert!(matches!(
        err,
        rustycdm_io::IoError::OutOfBounds {
            offset: 0,
            len: 192,
            available: 100
        }
    ));
}

// ---------------------------------------------------------------------------
// 2. In-memory sources agree
// ---------------------------------------------------------------------------

#[test]
fn borrowed_and_owned_sources_agree() {
    let bytes = f32_bytes(&grid_values());
    let layout = Layout::new(&[6, 8], 4);
    let sel = Selection::parse("0:5:2,3:6", &[6, 8]).unwrap();

    let owned = read_section(&MemorySource::new(bytes.clone()), &layout, &sel).unwrap();
    let borrowed = read_section(&BorrowedSource::new(&bytes), &layout, &sel).unwrap();
    assert_eq!(owned, borrowed);
    assert_eq!(
        f32s(&owned),
        vec![3.0, 4.0, 5.0, 6.0, 203.0, 204.0, 205.0, 206.0, 403.0, 404.0, 405.0, 406.0]
    );
}

// ---------------------------------------------------------------------------
// 3. Classic record variables
// ---------------------------------------------------------------------------

/// Two record variables interleaved after a 16-byte header:
/// `t` (int, one per record) and `v` (float[4] per record); recsize 20.
fn classic_file(numrecs: u64) -> ClassicFile {
    ClassicFile::new(
        vec![
            ClassicVariable::record("t", &[0], NcType::Int, 16),
            ClassicVariable::record("v", &[0, 4], NcType::Float, 20),
        ],
        numrecs,
    )
}

/// Value of `v[r][j]`.
fn cell(r: usize, j: usize) -> f32 {
    r as f32 + j as f32 / 10.0
}

fn classic_bytes(numrecs: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; 16 + numrecs * 20];
    for r in 0..numrecs {
        let rec = 16 + r * 20;
        bytes[rec..rec + 4].copy_from_slice(&(r as i32).to_le_bytes());
        for j in 0..4 {
            let v = cell(r, j);
            bytes[rec + 4 + j * 4..rec + 8 + j * 4].copy_from_slice(&v.to_le_bytes());
        }
    }
    bytes
}

#[test]
fn classic_record_read_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("records.nc");
    std::fs::write(&path, classic_bytes(10)).unwrap();

    let file = classic_file(10);
    assert_eq!(file.record_size(), 20);
    let src = FileSource::open(&path).unwrap();

    let raw = file.read_variable_section(&src, "v", "2:8:3,1:2").unwrap();
    assert_eq!(
        f32s(&raw),
        vec![cell(2, 1), cell(2, 2), cell(5, 1), cell(5, 2), cell(8, 1), cell(8, 2)]
    );

    let t = file.read_variable_section(&src, "t", "7:9").unwrap();
    let t: Vec<i32> = t
        .chunks_exact(4)
        .map(|b| i32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect();
    assert_eq!(t, vec![7, 8, 9]);
}

#[test]
fn classic_record_write_keeps_other_variables() {
    let file = classic_file(3);
    let mut mem = MemorySource::new(classic_bytes(3));
    let layout = file.storage("v").unwrap().layout();

    let sel = Selection::parse(":,3", &[3, 4]).unwrap();
    write_section(&mut mem, &layout, &sel, &f32_bytes(&[-1.0, -2.0, -3.0])).unwrap();

    let v = file
        .read_variable(&mem, "v", &Selection::full(&[3, 4]))
        .unwrap();
    let expected: Vec<f32> = (0..3)
        .flat_map(|r| [cell(r, 0), cell(r, 1), cell(r, 2), -(r as f32) - 1.0])
        .collect();
    assert_eq!(f32s(&v), expected);
    let t = file.read_variable_section(&mem, "t", ":").unwrap();
    assert_eq!(t, [0i32, 1, 2].iter().flat_map(|v| v.to_le_bytes()).collect::<Vec<_>>());
}

#[test]
fn classic_unknown_variable() {
    let file = classic_file(1);
    let mem = MemorySource::new(classic_bytes(1));
    let err = file.read_variable_section(&mem, "w", ":").unwrap_err();
    assert_eq!(err.to_string(), "variable not found: w");
}

// ---------------------------------------------------------------------------
// 4. Memory-mapped reads
// ---------------------------------------------------------------------------

#[cfg(feature = "mmap")]
#[test]
fn mmap_matches_file_source() {
    use rustycdm_io::MmapSource;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("records.nc");
    std::fs::write(&path, classic_bytes(50)).unwrap();

    let file = classic_file(50);
    let mapped = MmapSource::open(&path).unwrap();
    let plain = FileSource::open(&path).unwrap();
    mapped.advise_willneed(0, mapped.len()).unwrap();

    let a = file.read_variable_section(&mapped, "v", "10:49:13,:").unwrap();
    let b = file.read_variable_section(&plain, "v", "10:49:13,:").unwrap();
    assert_eq!(a, b);
    assert_eq!(f32s(&a)[..4], [cell(10, 0), cell(10, 1), cell(10, 2), cell(10, 3)]);

    // first record's `v` slab, borrowed straight from the mapping
    assert_eq!(
        f32s(mapped.slice(20, 16).unwrap()),
        (0..4).map(|j| cell(0, j)).collect::<Vec<_>>()
    );
}

// ---------------------------------------------------------------------------
// 5. Parallel reads
// ---------------------------------------------------------------------------

#[cfg(feature = "parallel")]
#[test]
fn parallel_file_read_matches_sequential() {
    use rustycdm_io::read_section_parallel;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("records.nc");
    std::fs::write(&path, classic_bytes(200)).unwrap();

    let file = classic_file(200);
    let src = FileSource::open(&path).unwrap();
    let layout = file.storage("v").unwrap().layout();
    let sel = Selection::parse("0:199,0:2", &[200, 4]).unwrap();

    let seq_profiler = DefaultProfiler::new();
    let seq = read_section_with(&src, &layout, &sel, &ReadOptions::default(), &seq_profiler)
        .unwrap();
    let par_profiler = DefaultProfiler::new();
    let par = read_section_parallel(&src, &layout, &sel, &ReadOptions::default(), &par_profiler)
        .unwrap();

    assert_eq!(seq, par);
    assert_eq!(seq_profiler.total_reads(), 200);
    assert_eq!(par_profiler.total_reads(), 200);
    assert_eq!(par_profiler.total_bytes_read(), 200 * 12);
}
