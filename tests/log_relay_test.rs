use std::io::Write;
use workflow_relay::core::logs::{extract_primary_log, relay_lines, LogFilter};

fn build_log_archive(files: &[(&str, &str)]) -> Vec<u8> {
    let mut cursor = std::io::Cursor::new(Vec::new());
    {
        let mut zip = zip::write::ZipWriter::new(&mut cursor);
        for (name, content) in files {
            zip.start_file::<_, ()>(*name, zip::write::FileOptions::default())
                .unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        }
        zip.finish().unwrap();
    }
    cursor.into_inner()
}

#[test]
fn test_multi_job_archive_relays_only_the_aggregated_log() {
    // GitHub 的日誌壓縮檔：每個 job 一個子目錄，彙整日誌在最上層
    let archive = build_log_archive(&[
        ("1_build/1_Set up job.txt", "setup detail"),
        ("1_build/2_Run tests.txt", "test detail"),
        ("2_deploy/1_Set up job.txt", "deploy detail"),
        (
            "0_ci.txt",
            concat!(
                "2026-02-10T08:00:01Z Requested labels: ubuntu-latest\n",
                "2026-02-10T08:00:05Z remote: Counting objects: 100% (32/32)\n",
                "2026-02-10T08:00:05Z remote: Compressing objects: 100% (16/16)\n",
                "2026-02-10T08:00:09Z 3f4a5b: Pulling fs layer\n",
                "2026-02-10T08:00:10Z 3f4a5b: Waiting\n",
                "2026-02-10T08:00:12Z 3f4a5b: Verifying Checksum\n",
                "2026-02-10T08:00:14Z 3f4a5b: Download complete\n",
                "2026-02-10T08:00:18Z 3f4a5b: Pull complete\n",
                "2026-02-10T08:01:02Z cargo test ... ok\n",
                "2026-02-10T08:01:03Z Cleaning up orphan processes"
            ),
        ),
    ]);

    let text = extract_primary_log(&archive).unwrap();
    assert!(text.starts_with("2026-02-10T08:00:01Z Requested labels"));
    assert!(!text.contains("setup detail"));

    let filter = LogFilter::new().unwrap();
    let mut out = Vec::new();
    let relayed = relay_lines(&text, &filter, &mut out).unwrap();

    let printed = String::from_utf8(out).unwrap();
    assert_eq!(relayed, 3);
    assert!(printed.contains("Requested labels: ubuntu-latest"));
    assert!(printed.contains("cargo test ... ok"));
    assert!(printed.contains("Cleaning up orphan processes"));
    assert!(!printed.contains("Pulling fs layer"));
    assert!(!printed.contains("remote: Counting objects"));
}

#[test]
fn test_non_utf8_log_bytes_are_relayed_lossily() {
    let mut cursor = std::io::Cursor::new(Vec::new());
    {
        let mut zip = zip::write::ZipWriter::new(&mut cursor);
        zip.start_file::<_, ()>("0_ci.txt", zip::write::FileOptions::default())
            .unwrap();
        zip.write_all(b"progress \xdb\xdb\xdb done").unwrap();
        zip.finish().unwrap();
    }

    let text = extract_primary_log(&cursor.into_inner()).unwrap();
    assert!(text.starts_with("progress "));
    assert!(text.ends_with(" done"));
}
