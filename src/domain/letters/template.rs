use crate::domain::letters::letter::LetterPayload;

/// Logical form fields that letter templates spell differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LetterField {
    LetterType,
    ApplicantName,
    ApplicantIdNumber,
    Purpose,
    WantsPdf,
}

const LETTER_TYPE_ALIASES: &[&str] = &["letter_type", "jenis_surat"];
const APPLICANT_NAME_ALIASES: &[&str] = &["nama_pemohon", "nama", "nama_lengkap", "applicant_name"];
const APPLICANT_ID_ALIASES: &[&str] = &["nik_pemohon", "nik", "no_ktp", "applicant_id_number"];
const PURPOSE_ALIASES: &[&str] = &["keperluan", "tujuan", "purpose"];
const WANTS_PDF_ALIASES: &[&str] = &["pdf", "buat_pdf"];

/// Rendering templates, selected by the lowercased letter type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LetterTemplate {
    /// Surat Keterangan Tidak Mampu
    LowIncome,
    Domicile,
    Business,
    Birth,
    Death,
    /// Surat Pengantar SKCK
    PoliceRecord,
    General,
}

impl LetterTemplate {
    pub const DEFAULT: LetterTemplate = LetterTemplate::General;

    pub fn for_letter_type(letter_type: &str) -> Self {
        match letter_type.trim().to_lowercase().as_str() {
            "sktm" => LetterTemplate::LowIncome,
            "domisili" | "skd" => LetterTemplate::Domicile,
            "usaha" | "sku" => LetterTemplate::Business,
            "kelahiran" | "skl" => LetterTemplate::Birth,
            "kematian" | "skm" => LetterTemplate::Death,
            "pengantar" | "skck" => LetterTemplate::PoliceRecord,
            _ => Self::DEFAULT,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            LetterTemplate::LowIncome => "surat_sktm",
            LetterTemplate::Domicile => "surat_domisili",
            LetterTemplate::Business => "surat_usaha",
            LetterTemplate::Birth => "surat_kelahiran",
            LetterTemplate::Death => "surat_kematian",
            LetterTemplate::PoliceRecord => "surat_pengantar_skck",
            LetterTemplate::General => "surat_umum",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            LetterTemplate::LowIncome => "Surat Keterangan Tidak Mampu",
            LetterTemplate::Domicile => "Surat Keterangan Domisili",
            LetterTemplate::Business => "Surat Keterangan Usaha",
            LetterTemplate::Birth => "Surat Keterangan Kelahiran",
            LetterTemplate::Death => "Surat Keterangan Kematian",
            LetterTemplate::PoliceRecord => "Surat Pengantar SKCK",
            LetterTemplate::General => "Surat Keterangan",
        }
    }

    /// Field names tried for `field`, in precedence order.
    ///
    /// Birth letters name the child, death letters the deceased and business
    /// letters the owner before falling back to the common applicant fields.
    pub fn aliases(self, field: LetterField) -> Vec<&'static str> {
        let lead: &[&str] = match (self, field) {
            (LetterTemplate::Birth, LetterField::ApplicantName) => &["nama_anak"],
            (LetterTemplate::Death, LetterField::ApplicantName) => &["nama_almarhum"],
            (LetterTemplate::Death, LetterField::ApplicantIdNumber) => &["nik_almarhum"],
            (LetterTemplate::Business, LetterField::ApplicantName) => &["nama_pemilik"],
            _ => &[],
        };
        let common = match field {
            LetterField::LetterType => LETTER_TYPE_ALIASES,
            LetterField::ApplicantName => APPLICANT_NAME_ALIASES,
            LetterField::ApplicantIdNumber => APPLICANT_ID_ALIASES,
            LetterField::Purpose => PURPOSE_ALIASES,
            LetterField::WantsPdf => WANTS_PDF_ALIASES,
        };
        lead.iter().chain(common.iter()).copied().collect()
    }

    /// First non-blank value among the aliases of `field`, trimmed.
    pub fn resolve(self, payload: &LetterPayload, field: LetterField) -> Option<String> {
        self.aliases(field).into_iter().find_map(|key| {
            payload
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        })
    }
}

/// Letter type as submitted, before any template is known.
pub fn submitted_letter_type(payload: &LetterPayload) -> Option<String> {
    LetterTemplate::DEFAULT.resolve(payload, LetterField::LetterType)
}
