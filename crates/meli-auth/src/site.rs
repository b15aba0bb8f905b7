//! Marketplace sites.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, ErrorKind};

/// A MercadoLibre marketplace site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SiteId {
    /// Argentina
    Mla,
    /// Brazil
    Mlb,
    /// Colombia
    Mco,
    /// Costa Rica
    Mcr,
    /// Ecuador
    Mec,
    /// Chile
    Mlc,
    /// Mexico
    Mlm,
    /// Uruguay
    Mlu,
    /// Venezuela
    Mlv,
    /// Panama
    Mpa,
    /// Peru
    Mpe,
    /// Portugal
    Mpt,
    /// Dominican Republic
    Mrd,
}

impl SiteId {
    /// Every supported site.
    pub const ALL: [SiteId; 13] = [
        SiteId::Mla,
        SiteId::Mlb,
        SiteId::Mco,
        SiteId::Mcr,
        SiteId::Mec,
        SiteId::Mlc,
        SiteId::Mlm,
        SiteId::Mlu,
        SiteId::Mlv,
        SiteId::Mpa,
        SiteId::Mpe,
        SiteId::Mpt,
        SiteId::Mrd,
    ];

    /// Three-letter site code, as used in ids and paths.
    pub const fn as_str(self) -> &'static str {
        match self {
            SiteId::Mla => "MLA",
            SiteId::Mlb => "MLB",
            SiteId::Mco => "MCO",
            SiteId::Mcr => "MCR",
            SiteId::Mec => "MEC",
            SiteId::Mlc => "MLC",
            SiteId::Mlm => "MLM",
            SiteId::Mlu => "MLU",
            SiteId::Mlv => "MLV",
            SiteId::Mpa => "MPA",
            SiteId::Mpe => "MPE",
            SiteId::Mpt => "MPT",
            SiteId::Mrd => "MRD",
        }
    }

    /// Host serving the OAuth authorization page for this site.
    pub const fn auth_host(self) -> &'static str {
        match self {
            SiteId::Mla => "auth.mercadolibre.com.ar",
            SiteId::Mlb => "auth.mercadolivre.com.br",
            SiteId::Mco => "auth.mercadolibre.com.co",
            SiteId::Mcr => "auth.mercadolibre.co.cr",
            SiteId::Mec => "auth.mercadolibre.com.ec",
            SiteId::Mlc => "auth.mercadolibre.cl",
            SiteId::Mlm => "auth.mercadolibre.com.mx",
            SiteId::Mlu => "auth.mercadolibre.com.uy",
            SiteId::Mlv => "auth.mercadolibre.com.ve",
            SiteId::Mpa => "auth.mercadolibre.com.pa",
            SiteId::Mpe => "auth.mercadolibre.com.pe",
            SiteId::Mpt => "auth.mercadolivre.pt",
            SiteId::Mrd => "auth.mercadolibre.com.do",
        }
    }

    /// Site encoded in the prefix of an item or category id (`MLA1234` is `Mla`).
    pub fn from_id_prefix(id: &str) -> Option<SiteId> {
        let prefix = id.get(..3)?;
        prefix.parse().ok()
    }
}

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SiteId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SiteId::ALL
            .into_iter()
            .find(|site| site.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::new(ErrorKind::InvalidSiteId(s.to_string())))
    }
}
