use htmlescape::{encode_attribute as escape_attr, encode_minimal as escape_html};

use crate::application::dto::dashboard::DashboardSummaryDto;
use crate::application::dto::letters::{ArchivedLetterDto, CreatedLetterDto, GeneratedArtifact};
use crate::domain::archive::document::ArchivedDocument;
use crate::domain::letters::letter::ArtifactKind;

const STYLE: &str = "body { font-family: system-ui, sans-serif; margin: 0; background: #f5f6f8; color: #222; }\n\
nav { background: #1f4e79; padding: 12px 24px; }\n\
nav a { color: #fff; margin-right: 18px; text-decoration: none; font-weight: 600; }\n\
main { max-width: 1000px; margin: 24px auto; background: #fff; padding: 24px; border-radius: 6px; }\n\
table { border-collapse: collapse; width: 100%; }\n\
th, td { border-bottom: 1px solid #ddd; padding: 6px 8px; text-align: left; }\n\
label { display: block; margin-top: 10px; font-weight: 600; }\n\
input, select, textarea { width: 100%; padding: 6px; box-sizing: border-box; }\n\
input[type=checkbox] { width: auto; }\n\
button { margin-top: 14px; padding: 8px 18px; }\n\
.warning { background: #fff3cd; border: 1px solid #e0c36a; padding: 10px; margin-bottom: 12px; }\n\
iframe.preview { width: 100%; height: 700px; border: 1px solid #ccc; }\n";

/// Wraps `body` (already escaped) in the shared page chrome.
pub fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"id\">\n<head>\n<meta charset=\"utf-8\" />\n<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\" />\n<title>{title} - Arsip Desa</title>\n<style>\n{style}</style>\n</head>\n<body>\n<nav><a href=\"/dashboard\">Dashboard</a><a href=\"/arsip-digital\">Arsip Digital</a><a href=\"/manajemen-surat\">Manajemen Surat</a></nav>\n<main>\n<h1>{title}</h1>\n{body}</main>\n</body>\n</html>\n",
        title = escape_html(title),
        style = STYLE,
        body = body,
    )
}

pub fn login_page() -> String {
    layout(
        "Masuk",
        "<form method=\"post\" action=\"/\">\n<label for=\"username\">Nama pengguna</label>\n<input id=\"username\" name=\"username\" />\n<label for=\"password\">Kata sandi</label>\n<input id=\"password\" name=\"password\" type=\"password\" />\n<button type=\"submit\">Masuk</button>\n</form>\n",
    )
}

fn artifact_links(artifacts: &[GeneratedArtifact]) -> String {
    let mut out = String::from("<ul class=\"artifacts\">\n");
    for a in artifacts {
        let label = match a.kind {
            ArtifactKind::Html => "HTML",
            ArtifactKind::Pdf => "PDF",
        };
        out.push_str(&format!(
            "<li><a href=\"/generated/{href}\">Unduh {label}</a> ({name})</li>\n",
            href = urlencoding::encode(&a.filename),
            label = label,
            name = escape_html(&a.filename),
        ));
    }
    out.push_str("</ul>\n");
    out
}

pub fn dashboard_page(summary: &DashboardSummaryDto) -> String {
    let mut body = format!(
        "<p>Jumlah dokumen arsip: <strong>{}</strong></p>\n<p>Surat dibuat hari ini: <strong>{}</strong></p>\n",
        summary.document_count, summary.letters_today
    );
    if !summary.recent_letters.is_empty() {
        body.push_str("<h2>Surat terbaru</h2>\n<table>\n<tr><th>Nomor</th><th>Pemohon</th><th>Dibuat</th></tr>\n");
        for l in &summary.recent_letters {
            body.push_str(&format!(
                "<tr><td><a href=\"/surat/arsip/{id}\">{number}</a></td><td>{name}</td><td>{at}</td></tr>\n",
                id = l.id,
                number = escape_html(&l.letter_number),
                name = escape_html(&l.applicant_name),
                at = l.created_at.format("%d-%m-%Y %H:%M"),
            ));
        }
        body.push_str("</table>\n");
    }
    layout("Dashboard", &body)
}

pub fn add_document_form() -> String {
    "<form method=\"post\" action=\"/arsip-digital\" enctype=\"multipart/form-data\">\n\
<label for=\"file\">Berkas</label>\n<input id=\"file\" name=\"file\" type=\"file\" required />\n\
<label for=\"category\">Kategori</label>\n<select id=\"category\" name=\"category\">\n\
<option value=\"KTP\">KTP</option>\n<option value=\"KK\">Kartu Keluarga</option>\n\
<option value=\"AKTA_KELAHIRAN\">Akta Kelahiran</option>\n<option value=\"SURAT_NIKAH\">Surat Nikah</option>\n\
<option value=\"OTHER\">Lainnya</option>\n</select>\n\
<label for=\"category_other\">Kategori lainnya</label>\n<input id=\"category_other\" name=\"category_other\" />\n\
<label for=\"document_name\">Nama dokumen</label>\n<input id=\"document_name\" name=\"document_name\" />\n\
<label for=\"id_number\">NIK</label>\n<input id=\"id_number\" name=\"id_number\" />\n\
<button type=\"submit\">Unggah</button>\n</form>\n"
        .to_string()
}

pub fn add_document_page() -> String {
    layout("Tambah Arsip", &add_document_form())
}

pub fn archive_page(documents: &[ArchivedDocument]) -> String {
    let mut body = String::from(
        "<input id=\"search\" placeholder=\"Cari dokumen...\" data-endpoint=\"/api/search\" />\n",
    );
    body.push_str("<table>\n<tr><th>Nama dokumen</th><th>NIK</th><th>Kategori</th><th>Diunggah</th><th>Berkas</th></tr>\n");
    for d in documents {
        body.push_str(&format!(
            "<tr><td>{name}</td><td>{nik}</td><td>{category}</td><td>{at}</td><td><a href=\"/arsip/{href}\">{file}</a></td></tr>\n",
            name = escape_html(&d.document_name),
            nik = escape_html(d.id_number.as_deref().unwrap_or("-")),
            category = escape_html(&d.category),
            at = d.uploaded_at.format("%d-%m-%Y %H:%M:%S"),
            href = urlencoding::encode(&d.archive_name),
            file = escape_html(&d.archive_name),
        ));
    }
    if documents.is_empty() {
        body.push_str("<tr><td colspan=\"5\">Belum ada dokumen.</td></tr>\n");
    }
    body.push_str("</table>\n<h2>Tambah arsip</h2>\n");
    body.push_str(&add_document_form());
    layout("Arsip Digital", &body)
}

pub fn letter_form_page() -> String {
    layout(
        "Manajemen Surat",
        "<input id=\"search\" placeholder=\"Cari surat...\" data-endpoint=\"/api/search-surat\" />\n\
<form method=\"post\" action=\"/manajemen-surat\">\n\
<label for=\"jenis_surat\">Jenis surat</label>\n<select id=\"jenis_surat\" name=\"jenis_surat\">\n\
<option value=\"sktm\">Surat Keterangan Tidak Mampu</option>\n<option value=\"domisili\">Surat Keterangan Domisili</option>\n\
<option value=\"usaha\">Surat Keterangan Usaha</option>\n<option value=\"kelahiran\">Surat Keterangan Kelahiran</option>\n\
<option value=\"kematian\">Surat Keterangan Kematian</option>\n<option value=\"pengantar\">Surat Pengantar SKCK</option>\n\
<option value=\"umum\">Surat Keterangan Umum</option>\n</select>\n\
<label for=\"nama_pemohon\">Nama pemohon</label>\n<input id=\"nama_pemohon\" name=\"nama_pemohon\" required />\n\
<label for=\"nik_pemohon\">NIK</label>\n<input id=\"nik_pemohon\" name=\"nik_pemohon\" />\n\
<label for=\"alamat\">Alamat</label>\n<input id=\"alamat\" name=\"alamat\" />\n\
<label for=\"keperluan\">Keperluan</label>\n<textarea id=\"keperluan\" name=\"keperluan\"></textarea>\n\
<label><input type=\"checkbox\" name=\"pdf\" value=\"1\" /> Buat PDF</label>\n\
<button type=\"submit\">Buat surat</button>\n</form>\n",
    )
}

pub fn letter_result_page(created: &CreatedLetterDto) -> String {
    let mut body = String::new();
    if let Some(warning) = created.pdf_warning.as_deref() {
        body.push_str(&format!(
            "<div class=\"warning\">{}</div>\n",
            escape_html(warning)
        ));
    }
    body.push_str(&format!(
        "<p>Surat nomor <strong>{number}</strong> berhasil dibuat. <a href=\"/surat/arsip/{id}\">Lihat arsip surat</a></p>\n",
        number = escape_html(&created.letter.letter_number),
        id = created.letter.id,
    ));
    body.push_str(&format!(
        "<p class=\"template\">Templat: <code>{}</code></p>\n",
        escape_html(created.template_id)
    ));
    body.push_str(&artifact_links(&created.artifacts));
    body.push_str(&format!(
        "<iframe class=\"preview\" title=\"Pratinjau surat\" srcdoc=\"{}\"></iframe>\n",
        escape_attr(&created.preview_html)
    ));
    layout("Surat Dibuat", &body)
}

pub fn letter_view_page(view: &ArchivedLetterDto) -> String {
    let l = &view.letter;
    let mut body = String::from("<table>\n");
    let rows = [
        ("Nomor surat", l.letter_number.clone()),
        ("Jenis surat", l.letter_type.clone()),
        ("Nama pemohon", l.applicant_name.clone()),
        (
            "NIK pemohon",
            l.applicant_id_number.clone().unwrap_or_else(|| "-".into()),
        ),
        ("Keperluan", l.purpose.clone()),
        ("Dibuat", l.created_at.format("%d-%m-%Y %H:%M:%S").to_string()),
    ];
    for (label, value) in rows {
        body.push_str(&format!(
            "<tr><th>{}</th><td>{}</td></tr>\n",
            escape_html(label),
            escape_html(&value)
        ));
    }
    body.push_str("</table>\n");
    if view.artifacts.is_empty() {
        body.push_str("<p>Berkas surat tidak ditemukan.</p>\n");
    } else {
        body.push_str(&artifact_links(&view.artifacts));
    }
    let pretty = serde_json::to_string_pretty(&l.payload()).unwrap_or_else(|_| l.raw_payload.clone());
    body.push_str(&format!(
        "<h2>Data formulir</h2>\n<pre>{}</pre>\n",
        escape_html(&pretty)
    ));
    layout("Arsip Surat", &body)
}

pub fn not_found_page(message: &str) -> String {
    layout(
        "Tidak Ditemukan",
        &format!("<p>{}</p>\n", escape_html(message)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::letters::letter::Letter;
    use chrono::NaiveDate;

    fn letter() -> Letter {
        Letter {
            id: 3,
            letter_number: "SKTM/2024-01-01/001".into(),
            letter_type: "sktm".into(),
            applicant_name: "Budi & Sons".into(),
            applicant_id_number: None,
            purpose: "Beasiswa".into(),
            raw_payload: r#"{"nama":"Budi & Sons"}"#.into(),
            created_at: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn result_page_shows_warning_links_and_escaped_preview() {
        let created = CreatedLetterDto {
            letter: letter(),
            template_id: "surat_sktm",
            artifacts: vec![GeneratedArtifact {
                kind: ArtifactKind::Html,
                filename: "SKTM_2024-01-01_001.html".into(),
            }],
            preview_html: "<p class=\"x\">Halo</p>".into(),
            pdf_warning: Some("PDF tidak dibuat".into()),
        };
        let html = letter_result_page(&created);
        assert!(html.contains("<div class=\"warning\">PDF tidak dibuat</div>"));
        assert!(html.contains("href=\"/generated/SKTM_2024-01-01_001.html\""));
        assert!(html.contains("srcdoc=\""));
        assert!(html.contains("Templat: <code>surat_sktm</code>"));
        assert!(!html.contains("<p class=\"x\">Halo</p>"));
    }

    #[test]
    fn view_page_escapes_payload() {
        let view = ArchivedLetterDto {
            letter: letter(),
            artifacts: Vec::new(),
        };
        let html = letter_view_page(&view);
        assert!(html.contains("Budi &amp; Sons"));
        assert!(html.contains("Berkas surat tidak ditemukan."));
    }

    #[test]
    fn archive_page_links_files() {
        let docs = vec![ArchivedDocument {
            id: 1,
            archive_name: "KK_SITI_20240101_080000.pdf".into(),
            document_name: "Siti".into(),
            id_number: None,
            category: "KK".into(),
            uploaded_at: letter().created_at,
        }];
        let html = archive_page(&docs);
        assert!(html.contains("href=\"/arsip/KK_SITI_20240101_080000.pdf\""));
        assert!(!html.contains("Belum ada dokumen."));
    }
}
