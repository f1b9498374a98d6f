//! File and stdin helpers: prompt input, run-log discovery and parsing.
//!
//! Run logs are JSONL, optionally Zstandard-compressed (`.jsonl.zst`).

use std::io::BufRead;
use std::path::{Path, PathBuf};

use stopper_engine::logger::RoundRecord;

/// Reads one trimmed line; `None` on EOF or read error.
///
/// ```rust,no_run
/// use std::io;
/// # use stopper_cli::io_utils::read_stdin_line;
///
/// let stdin = io::stdin();
/// let mut handle = stdin.lock();
/// if let Some(line) = read_stdin_line(&mut handle) {
///     println!("You entered: {}", line);
/// }
/// ```
pub fn read_stdin_line(stdin: &mut dyn BufRead) -> Option<String> {
    let mut line = String::new();
    match stdin.read_line(&mut line) {
        Ok(0) => None,
        Ok(_) => Some(line.trim().to_string()),
        Err(_) => None,
    }
}

/// Reads a text file, decompressing `.zst` and stripping a UTF-8 BOM.
pub fn read_text_auto(path: &str) -> Result<String, String> {
    let mut content = if path.ends_with(".zst") {
        let comp = std::fs::read(path).map_err(|e| e.to_string())?;
        let dec = zstd::bulk::decompress(&comp, 8 * 1024 * 1024).map_err(|e| e.to_string())?;
        String::from_utf8(dec).map_err(|e| e.to_string())?
    } else {
        std::fs::read_to_string(path).map_err(|e| e.to_string())?
    };
    strip_utf8_bom(&mut content);
    Ok(content)
}

pub fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create directory {}: {}", parent.display(), e))?;
    }
    Ok(())
}

fn strip_utf8_bom(s: &mut String) {
    const UTF8_BOM: &str = "\u{feff}";
    if s.starts_with(UTF8_BOM) {
        s.drain(..UTF8_BOM.len());
    }
}

/// `path` itself if it is a file, otherwise every `.jsonl` / `.jsonl.zst`
/// below it, sorted.
pub fn collect_run_logs(path: &Path) -> Vec<PathBuf> {
    if !path.is_dir() {
        return vec![path.to_path_buf()];
    }
    let mut found = Vec::new();
    let mut stack = vec![path.to_path_buf()];
    while let Some(d) = stack.pop() {
        let Ok(rd) = std::fs::read_dir(&d) else {
            continue;
        };
        for e in rd.filter_map(Result::ok) {
            let p = e.path();
            if p.is_dir() {
                stack.push(p);
            } else if let Some(fname) = p.file_name().and_then(|f| f.to_str())
                && (fname.ends_with(".jsonl") || fname.ends_with(".jsonl.zst"))
            {
                found.push(p);
            }
        }
    }
    found.sort();
    found
}

/// Records parsed from one run log.
#[derive(Debug, Default)]
pub struct ParsedLog {
    /// 1-based line number and record
    pub records: Vec<(usize, RoundRecord)>,
    /// Lines that are not valid records
    pub corrupted: Vec<usize>,
    /// An unparsable last line without a newline (interrupted write)
    pub truncated: bool,
}

pub fn parse_run_log(content: &str) -> ParsedLog {
    let has_trailing_nl = content.ends_with('\n');
    let lines: Vec<(usize, &str)> = content
        .lines()
        .enumerate()
        .filter(|(_, l)| !l.trim().is_empty())
        .map(|(i, l)| (i + 1, l))
        .collect();
    let mut parsed = ParsedLog::default();
    for (idx, (line_no, line)) in lines.iter().enumerate() {
        match serde_json::from_str::<RoundRecord>(line) {
            Ok(rec) => parsed.records.push((*line_no, rec)),
            Err(_) if idx == lines.len() - 1 && !has_trailing_nl => parsed.truncated = true,
            Err(_) => parsed.corrupted.push(*line_no),
        }
    }
    parsed
}
