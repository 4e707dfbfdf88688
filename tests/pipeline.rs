//! End-to-end pipeline tests over a synthetic regulation document

use tanya_akademik::config::IngestionConfig;
use tanya_akademik::ingestion::RegulationPipeline;
use tanya_akademik::types::Page;

fn header(page_number: u32) -> String {
    format!("Peraturan Akademik 2024 | {}", page_number)
}

/// A small but structurally complete document: cover page, table of
/// contents, a repeating header, section and article headings, and a
/// clause split across a page break.
fn synthetic_document() -> Vec<Page> {
    vec![
        Page::new(
            0,
            format!(
                "{}\nPERATURAN AKADEMIK\nINSTITUT TEKNOLOGI\nTAHUN 2024",
                header(1)
            ),
        ),
        Page::new(
            1,
            format!(
                "{}\nDAFTAR ISI\nBab I Ketentuan Umum ....... 1\nBab II Pembelajaran ....... 5",
                header(2)
            ),
        ),
        Page::new(
            2,
            format!(
                "{}\nBAB I KETENTUAN UMUM\nPasal 1 Pengertian\n(1) Institut adalah perguruan tinggi penyelenggara.\n(2) Mahasiswa adalah peserta didik terdaftar.",
                header(3)
            ),
        ),
        Page::new(
            3,
            format!(
                "{}\nPasal 2 Rencana Studi\n(1) Setiap mahasiswa wajib menyusun rencana studi pada setiap awal",
                header(4)
            ),
        ),
        Page::new(
            4,
            format!(
                "{}\nsemester bersama dosen wali.\n(2) Perubahan rencana studi diajukan paling lambat dua minggu.",
                header(5)
            ),
        ),
        Page::corrupt(5),
    ]
}

#[test]
fn full_document_is_chunked_with_provenance() {
    let pipeline = RegulationPipeline::new(IngestionConfig::default());
    let processed = pipeline.process_pages("Peraturan_Akademik_2024.pdf", &synthetic_document());

    // Cover, ToC, and the corrupt page are gone
    assert_eq!(processed.stats.pages_total, 6);
    assert_eq!(processed.stats.pages_skipped, 3);

    // BAB heading + two clauses of Pasal 1 + two clauses of Pasal 2
    assert_eq!(processed.chunks.len(), 5);

    // The repeating header never reaches chunk text
    assert!(processed
        .chunks
        .iter()
        .all(|c| !c.text.contains("Peraturan Akademik 2024 |")));

    let pasal1: Vec<_> = processed
        .chunks
        .iter()
        .filter(|c| c.article_context.as_deref() == Some("Pasal 1 Pengertian"))
        .collect();
    assert_eq!(pasal1.len(), 2);
    assert_eq!(pasal1[0].clause_number, Some(1));
    assert_eq!(pasal1[1].clause_number, Some(2));
    assert!(pasal1.iter().all(|c| c.page == 2));
}

#[test]
fn clause_across_page_break_stays_whole() {
    let pipeline = RegulationPipeline::new(IngestionConfig::default());
    let processed = pipeline.process_pages("Peraturan_Akademik_2024.pdf", &synthetic_document());

    let split_clause = processed
        .chunks
        .iter()
        .find(|c| {
            c.article_context.as_deref() == Some("Pasal 2 Rencana Studi")
                && c.clause_number == Some(1)
        })
        .expect("clause chunk present");

    assert!(split_clause
        .text
        .contains("pada setiap awal\nsemester bersama dosen wali."));
    assert_eq!(split_clause.page, 3);
    assert_eq!(split_clause.merged_page_indices, vec![4]);
}

#[test]
fn reprocessing_is_deterministic() {
    let pipeline = RegulationPipeline::new(IngestionConfig::default());
    let pages = synthetic_document();

    let first = pipeline.process_pages("Peraturan_Akademik_2024.pdf", &pages);
    let second = pipeline.process_pages("Peraturan_Akademik_2024.pdf", &pages);

    let first_keys: Vec<String> = first.chunks.iter().map(|c| c.identity_key()).collect();
    let second_keys: Vec<String> = second.chunks.iter().map(|c| c.identity_key()).collect();
    assert_eq!(first_keys, second_keys);

    let first_texts: Vec<&str> = first.chunks.iter().map(|c| c.text.as_str()).collect();
    let second_texts: Vec<&str> = second.chunks.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(first_texts, second_texts);
}
