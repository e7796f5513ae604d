use crate::utils::error::{RelayError, Result};
use regex::Regex;
use std::io::{Cursor, Read, Write};

/// 過濾 CI 日誌裡的雜訊行
pub struct LogFilter {
    docker_noise: Regex,
    git_noise: Regex,
}

impl LogFilter {
    pub fn new() -> Result<Self> {
        Ok(Self {
            // Docker pull 的進度行
            docker_noise: Regex::new(
                r"(Pulling fs layer|Waiting|Verifying Checksum|Download complete|Pull complete)$",
            )?,
            // git clone 的進度行
            git_noise: Regex::new(r"remote: Counting objects|remote: Compressing objects")?,
        })
    }

    pub fn is_noise(&self, line: &str) -> bool {
        self.docker_noise.is_match(line.trim()) || self.git_noise.is_match(line)
    }
}

/// 從日誌壓縮檔裡取出總表日誌的文字內容。
///
/// GitHub 的 run logs 是一個 zip，裡面每個 job 各有子目錄，
/// 而路徑最短的檔案是整個 run 的彙整日誌。
pub fn extract_primary_log(data: &[u8]) -> Result<String> {
    let cursor = Cursor::new(data);
    let mut archive = zip::ZipArchive::new(cursor)?;

    let mut shortest: Option<(usize, String)> = None;
    for index in 0..archive.len() {
        let entry = archive.by_index(index)?;
        if !entry.is_file() {
            continue;
        }
        tracing::info!(" processing log: {}", entry.name());

        let is_shorter = shortest
            .as_ref()
            .map(|(_, path)| entry.name().len() < path.len())
            .unwrap_or(true);
        if is_shorter {
            shortest = Some((index, entry.name().to_string()));
        }
    }

    let (index, path) = shortest.ok_or(RelayError::EmptyLogArchive)?;
    tracing::info!("log file {}", path);

    let mut entry = archive.by_index(index)?;
    let mut raw = Vec::new();
    entry.read_to_end(&mut raw)?;

    // 日誌可能夾雜非 UTF-8 位元組，整份丟棄太可惜
    Ok(String::from_utf8_lossy(&raw).into_owned())
}

/// 逐行轉發日誌，回傳實際輸出的行數
pub fn relay_lines<W: Write>(text: &str, filter: &LogFilter, out: &mut W) -> Result<usize> {
    let mut relayed = 0;
    for line in text.split('\n') {
        if filter.is_noise(line) {
            continue;
        }
        writeln!(out, "{}", line)?;
        relayed += 1;
    }
    Ok(relayed)
}
