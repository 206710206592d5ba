use std::collections::BTreeSet;

use htmlescape::encode_minimal as escape_html;

use crate::domain::letters::letter::{Letter, LetterPayload};
use crate::domain::letters::template::{LetterField, LetterTemplate};

const DEFAULT_OFFICE: &str = "Pemerintah Desa";

/// Optional payload keys the letterhead and signature read from.
const OFFICE_KEYS: &[&str] = &["nama_desa", "kecamatan", "kabupaten", "nama_kepala_desa"];

struct Body {
    paragraph: String,
    used_keys: &'static [&'static str],
}

fn value<'p>(payload: &'p LetterPayload, key: &str) -> Option<&'p str> {
    payload
        .get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
}

fn value_or<'p>(payload: &'p LetterPayload, key: &str, fallback: &'p str) -> &'p str {
    value(payload, key).unwrap_or(fallback)
}

/// `tempat_lahir` -> `Tempat lahir`
fn humanize_key(key: &str) -> String {
    let spaced = key.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn body_for(template: LetterTemplate, payload: &LetterPayload) -> Body {
    match template {
        LetterTemplate::LowIncome => Body {
            paragraph: "Orang tersebut di atas adalah benar warga kami dan berdasarkan data yang ada \
                        tergolong keluarga tidak mampu (pra-sejahtera)."
                .to_string(),
            used_keys: &[],
        },
        LetterTemplate::Domicile => Body {
            paragraph: format!(
                "Orang tersebut di atas adalah benar berdomisili di {} sejak {} sampai dengan sekarang.",
                escape_html(value_or(payload, "alamat", "wilayah desa kami")),
                escape_html(value_or(payload, "sejak", "beberapa waktu lalu")),
            ),
            used_keys: &["alamat", "sejak"],
        },
        LetterTemplate::Business => Body {
            paragraph: format!(
                "Orang tersebut di atas adalah benar memiliki usaha {} yang berlokasi di {}.",
                escape_html(value_or(payload, "nama_usaha", "")),
                escape_html(value_or(payload, "alamat_usaha", "wilayah desa kami")),
            ),
            used_keys: &["nama_usaha", "alamat_usaha"],
        },
        LetterTemplate::Birth => Body {
            paragraph: format!(
                "Telah lahir seorang anak pada tanggal {} di {}, dari seorang ibu bernama {} dan ayah bernama {}.",
                escape_html(value_or(payload, "tanggal_lahir", "-")),
                escape_html(value_or(payload, "tempat_lahir", "-")),
                escape_html(value_or(payload, "nama_ibu", "-")),
                escape_html(value_or(payload, "nama_ayah", "-")),
            ),
            used_keys: &["tanggal_lahir", "tempat_lahir", "nama_ibu", "nama_ayah"],
        },
        LetterTemplate::Death => Body {
            paragraph: format!(
                "Orang tersebut di atas telah meninggal dunia pada tanggal {} di {} disebabkan karena {}.",
                escape_html(value_or(payload, "tanggal_meninggal", "-")),
                escape_html(value_or(payload, "tempat_meninggal", "-")),
                escape_html(value_or(payload, "sebab_meninggal", "-")),
            ),
            used_keys: &["tanggal_meninggal", "tempat_meninggal", "sebab_meninggal"],
        },
        LetterTemplate::PoliceRecord => Body {
            paragraph: "Orang tersebut di atas adalah benar warga kami, berkelakuan baik dan sepanjang \
                        pengetahuan kami tidak pernah tersangkut perkara pidana."
                .to_string(),
            used_keys: &[],
        },
        LetterTemplate::General => Body {
            paragraph: "Orang tersebut di atas adalah benar warga desa kami.".to_string(),
            used_keys: &[],
        },
    }
}

fn consumed_keys(template: LetterTemplate, body: &Body) -> BTreeSet<&'static str> {
    let mut keys: BTreeSet<&'static str> = [
        LetterField::LetterType,
        LetterField::ApplicantName,
        LetterField::ApplicantIdNumber,
        LetterField::Purpose,
        LetterField::WantsPdf,
    ]
    .into_iter()
    .flat_map(|field| template.aliases(field))
    .collect();
    keys.extend(body.used_keys.iter().copied());
    keys.extend(OFFICE_KEYS.iter().copied());
    keys
}

fn row(label: &str, value: &str) -> String {
    format!(
        "<tr><td class=\"label\">{}</td><td>:</td><td>{}</td></tr>\n",
        escape_html(label),
        escape_html(value)
    )
}

/// Renders the printable HTML document for `letter` using `template`.
pub fn render_letter(letter: &Letter, payload: &LetterPayload, template: LetterTemplate) -> String {
    let office = value_or(payload, "nama_desa", DEFAULT_OFFICE);
    let body = body_for(template, payload);
    let consumed = consumed_keys(template, &body);

    let mut identity = String::new();
    identity.push_str(&row("Nama", &letter.applicant_name));
    if let Some(nik) = letter.applicant_id_number.as_deref() {
        identity.push_str(&row("NIK", nik));
    }
    for (key, val) in payload {
        if consumed.contains(key.as_str()) || val.trim().is_empty() {
            continue;
        }
        identity.push_str(&row(&humanize_key(key), val.trim()));
    }

    let purpose = if letter.purpose.trim().is_empty() {
        String::new()
    } else {
        format!(
            "<p>Surat keterangan ini dibuat untuk keperluan: <strong>{}</strong>.</p>\n",
            escape_html(letter.purpose.trim())
        )
    };

    let region: Vec<String> = [("kecamatan", "Kecamatan"), ("kabupaten", "Kabupaten")]
        .into_iter()
        .filter_map(|(key, label)| value(payload, key).map(|v| format!("{label} {v}")))
        .collect();
    let region_line = if region.is_empty() {
        String::new()
    } else {
        format!("<div class=\"region\">{}</div>\n", escape_html(&region.join(", ")))
    };

    format!(
        "<!DOCTYPE html>\n<html lang=\"id\">\n<head>\n<meta charset=\"utf-8\" />\n<title>{number}</title>\n<style>\nbody {{ font-family: 'Times New Roman', serif; margin: 2.5cm; line-height: 1.5; }}\n.kop {{ text-align: center; border-bottom: 3px double #000; padding-bottom: 8px; }}\n.kop .office {{ font-size: 18pt; font-weight: bold; text-transform: uppercase; }}\nh1 {{ text-align: center; font-size: 14pt; text-decoration: underline; margin-bottom: 0; }}\n.number {{ text-align: center; margin-top: 0; }}\ntable.identity td {{ vertical-align: top; padding: 2px 6px; }}\ntable.identity td.label {{ width: 35%; }}\n.signature {{ margin-top: 48px; margin-left: 60%; text-align: center; }}\n</style>\n</head>\n<body data-template=\"{template_id}\">\n<div class=\"kop\">\n<div class=\"office\">{office}</div>\n{region}</div>\n<h1>{title}</h1>\n<p class=\"number\">Nomor: {number}</p>\n<p>Yang bertanda tangan di bawah ini menerangkan bahwa:</p>\n<table class=\"identity\">\n{identity}</table>\n<p>{body}</p>\n{purpose}<p>Demikian surat keterangan ini dibuat untuk dapat dipergunakan sebagaimana mestinya.</p>\n<div class=\"signature\">\n<div>{office}, {date}</div>\n<div>Kepala Desa</div>\n<div style=\"height: 72px\"></div>\n<div><strong>{head}</strong></div>\n</div>\n</body>\n</html>\n",
        number = escape_html(&letter.letter_number),
        template_id = template.id(),
        office = escape_html(office),
        region = region_line,
        title = escape_html(&template.title().to_uppercase()),
        identity = identity,
        body = body.paragraph,
        purpose = purpose,
        date = letter.created_at.format("%d-%m-%Y"),
        head = escape_html(value_or(payload, "nama_kepala_desa", "(.............................)")),
    )
}
