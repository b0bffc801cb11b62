//! Protocol-combination and metadata-schema checks.
//!
//! Validators never fail loudly. [`validate_protocols`] returns the first
//! broken rule, checked in a fixed priority order that callers may rely on.
//! [`validate_metadata`] keeps going and returns every problem it finds, so
//! many records can be checked in one pass.

use std::collections::BTreeSet;
use std::fmt;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::constants::{
    MAX_DESC_LEN, MAX_MIME_LEN, MAX_NAME_LEN, MAX_PATH_LEN, MAX_PROTOCOLS, MAX_ROYALTY_BPS,
    is_known_version,
};
use crate::metadata::{FileEntry, GlyphMetadata, Royalty};
use crate::protocol::ProtocolId;

/// Protocols whose presence requires other protocols, in check order.
const DEPENDENCIES: &[(ProtocolId, &[ProtocolId])] = &[
    (ProtocolId::Dmint, &[ProtocolId::Ft]),
    (ProtocolId::Mut, &[ProtocolId::Nft]),
    (ProtocolId::Container, &[ProtocolId::Nft]),
    (ProtocolId::Encrypted, &[ProtocolId::Nft]),
    (ProtocolId::Authority, &[ProtocolId::Nft]),
    (ProtocolId::Timelock, &[ProtocolId::Encrypted]),
    (ProtocolId::Wave, &[ProtocolId::Nft, ProtocolId::Mut]),
];

/// Protocols whose metadata section is checked, in check order.
const SECTION_OWNERS: [ProtocolId; 4] = [
    ProtocolId::Container,
    ProtocolId::Dmint,
    ProtocolId::Authority,
    ProtocolId::Encrypted,
];

/// A broken protocol-combination rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolViolation {
    /// No protocols listed.
    #[error("protocol list must not be empty")]
    Empty,

    /// More than [`MAX_PROTOCOLS`] listed.
    #[error("too many protocols ({0}, max {MAX_PROTOCOLS})")]
    TooMany(usize),

    /// Not a known protocol id.
    #[error("unknown protocol id {0}")]
    Unknown(i64),

    /// Two protocols that cannot be combined.
    #[error("{0} and {1} are mutually exclusive")]
    MutuallyExclusive(ProtocolId, ProtocolId),

    /// A protocol without one it depends on.
    #[error("{protocol} requires {requires}")]
    MissingDependency {
        /// The dependent protocol.
        protocol: ProtocolId,
        /// The missing protocol.
        requires: ProtocolId,
    },

    /// A protocol that cannot be the only one.
    #[error("{0} cannot be used alone")]
    Standalone(ProtocolId),

    /// Burn without a token to burn.
    #[error("BURN requires FT or NFT")]
    BurnWithoutToken,
}

/// A broken metadata rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetadataViolation {
    /// The value could not be read as metadata at all.
    #[error("malformed metadata: {0}")]
    Malformed(String),

    /// `v` missing.
    #[error("missing version")]
    MissingVersion,

    /// `v` not a known version.
    #[error("unsupported version {0}")]
    UnsupportedVersion(i64),

    /// A field holding the wrong JSON type.
    #[error("{field} has the wrong type, expected {expected}")]
    InvalidType {
        /// Field path.
        field: String,
        /// Expected JSON type.
        expected: &'static str,
    },

    /// `type` missing.
    #[error("missing type")]
    MissingType,

    /// `p` missing.
    #[error("missing protocols")]
    MissingProtocols,

    /// `p` invalid.
    #[error("invalid protocols: {0}")]
    Protocols(#[from] ProtocolViolation),

    /// A text field over its byte limit.
    #[error("{field} is {len} bytes, exceeds {limit}")]
    TooLong {
        /// Field path.
        field: String,
        /// Length in UTF-8 bytes.
        len: usize,
        /// Limit.
        limit: usize,
    },

    /// A field a listed protocol needs.
    #[error("{protocol} requires {field}")]
    ProtocolRequires {
        /// Protocol needing the field.
        protocol: ProtocolId,
        /// Field path.
        field: &'static str,
    },

    /// A required field inside content or royalty.
    #[error("missing {0}")]
    MissingField(String),

    /// Royalty outside [0, 10000] basis points.
    #[error("royalty bps {0} out of range")]
    RoyaltyBpsOutOfRange(i64),

    /// Royalty splits not adding up to the royalty.
    #[error("royalty splits total {actual} bps, expected {expected}")]
    RoyaltySplitMismatch {
        /// Royalty bps.
        expected: i64,
        /// Sum of split bps.
        actual: i64,
    },
}

/// Checks a protocol list, returning the first broken rule.
///
/// Rules, in order: the list is non-empty, at most [`MAX_PROTOCOLS`] long
/// and only known ids; FT and NFT are exclusive; dependencies are present;
/// add-on protocols are not alone; BURN comes with FT or NFT.
pub fn validate_protocols(protocols: &[u8]) -> Result<(), ProtocolViolation> {
    if protocols.is_empty() {
        return Err(ProtocolViolation::Empty);
    }
    if protocols.len() > MAX_PROTOCOLS {
        return Err(ProtocolViolation::TooMany(protocols.len()));
    }

    let mut set = BTreeSet::new();
    for &raw in protocols {
        let id = ProtocolId::try_from(raw).map_err(|e| ProtocolViolation::Unknown(e.0.into()))?;
        set.insert(id);
    }
    let has = |p: ProtocolId| set.contains(&p);

    if has(ProtocolId::Ft) && has(ProtocolId::Nft) {
        return Err(ProtocolViolation::MutuallyExclusive(
            ProtocolId::Ft,
            ProtocolId::Nft,
        ));
    }

    for &(protocol, requires) in DEPENDENCIES {
        if !has(protocol) {
            continue;
        }
        if let Some(&missing) = requires.iter().find(|&&r| !has(r)) {
            return Err(ProtocolViolation::MissingDependency {
                protocol,
                requires: missing,
            });
        }
    }

    if set.len() == 1 {
        if let Some(&only) = set.first() {
            if !only.is_standalone() {
                return Err(ProtocolViolation::Standalone(only));
            }
        }
    }

    if has(ProtocolId::Burn) && !has(ProtocolId::Ft) && !has(ProtocolId::Nft) {
        return Err(ProtocolViolation::BurnWithoutToken);
    }

    Ok(())
}

fn present(s: &Option<String>) -> bool {
    s.as_deref().is_some_and(|s| !s.is_empty())
}

fn check_len(field: &str, value: &Option<String>, limit: usize, errs: &mut Vec<MetadataViolation>) {
    if let Some(v) = value {
        if v.len() > limit {
            errs.push(MetadataViolation::TooLong {
                field: field.to_string(),
                len: v.len(),
                limit,
            });
        }
    }
}

fn check_file(at: &str, file: &FileEntry, skip: &Skip, errs: &mut Vec<MetadataViolation>) {
    let missing = |name: &str| MetadataViolation::MissingField(format!("{at}.{name}"));

    if !present(&file.path) {
        errs.push(missing("path"));
    }
    check_len(&format!("{at}.path"), &file.path, MAX_PATH_LEN, errs);

    if !present(&file.mime) {
        errs.push(missing("mime"));
    }
    check_len(&format!("{at}.mime"), &file.mime, MAX_MIME_LEN, errs);

    if file.size.is_none() && !skip.contains(&format!("{at}.size")) {
        errs.push(missing("size"));
    }

    match &file.hash {
        None => errs.push(missing("hash")),
        Some(hash) => {
            if !present(&hash.algo) {
                errs.push(missing("hash.algo"));
            }
            if !present(&hash.hex) {
                errs.push(missing("hash.hex"));
            }
        }
    }
}

fn check_royalty(royalty: &Royalty, errs: &mut Vec<MetadataViolation>) {
    match royalty.bps {
        None => errs.push(MetadataViolation::MissingField("royalty.bps".to_string())),
        Some(bps) if !(0..=MAX_ROYALTY_BPS).contains(&bps) => {
            errs.push(MetadataViolation::RoyaltyBpsOutOfRange(bps))
        }
        Some(_) => {}
    }

    if !present(&royalty.address) {
        errs.push(MetadataViolation::MissingField(
            "royalty.address".to_string(),
        ));
    }

    let Some(splits) = &royalty.splits else {
        return;
    };

    let mut actual = 0i64;
    for (i, split) in splits.iter().enumerate() {
        match split.bps {
            Some(bps) => actual = actual.saturating_add(bps),
            None => errs.push(MetadataViolation::MissingField(format!(
                "royalty.splits[{i}].bps"
            ))),
        }
    }

    if let Some(expected) = royalty.bps {
        if actual != expected {
            errs.push(MetadataViolation::RoyaltySplitMismatch { expected, actual });
        }
    }
}

/// Checks a metadata record, returning every broken rule.
pub fn validate_metadata(meta: &GlyphMetadata) -> Result<(), Vec<MetadataViolation>> {
    let mut errs = Vec::new();
    check_metadata(meta, &Skip::new(), &mut errs);
    if errs.is_empty() { Ok(()) } else { Err(errs) }
}

/// Field paths already reported while reading a raw value.
type Skip = BTreeSet<String>;

fn check_metadata(meta: &GlyphMetadata, skip: &Skip, errs: &mut Vec<MetadataViolation>) {
    if !skip.contains("v") {
        match meta.v {
            None => errs.push(MetadataViolation::MissingVersion),
            Some(v) if !is_known_version(v) => {
                errs.push(MetadataViolation::UnsupportedVersion(v.into()))
            }
            Some(_) => {}
        }
    }

    if !skip.contains("type") && !present(&meta.token_type) {
        errs.push(MetadataViolation::MissingType);
    }

    if !skip.contains("p") {
        match &meta.p {
            None => errs.push(MetadataViolation::MissingProtocols),
            Some(p) => {
                if let Err(e) = validate_protocols(p) {
                    errs.push(e.into());
                }
            }
        }
    }

    check_len("name", &meta.name, MAX_NAME_LEN, errs);
    check_len("desc", &meta.desc, MAX_DESC_LEN, errs);

    let primary = meta.content.as_ref().and_then(|c| c.primary.as_ref());
    if meta.has_protocol(ProtocolId::Nft) && primary.is_none() {
        errs.push(MetadataViolation::ProtocolRequires {
            protocol: ProtocolId::Nft,
            field: "content.primary",
        });
    }

    if meta.has_protocol(ProtocolId::Ft)
        && meta.content.is_none()
        && !present(&meta.ticker)
        && !skip.contains("ticker")
    {
        errs.push(MetadataViolation::ProtocolRequires {
            protocol: ProtocolId::Ft,
            field: "ticker",
        });
    }

    for protocol in SECTION_OWNERS {
        let Some(kind) = protocol.required_section() else {
            continue;
        };
        if meta.has_protocol(protocol) && meta.section(kind).is_none() {
            errs.push(MetadataViolation::ProtocolRequires {
                protocol,
                field: kind.field_name(),
            });
        }
    }

    if let Some(content) = &meta.content {
        if let Some(primary) = &content.primary {
            check_file("content.primary", primary, skip, errs);
        }
        for (i, file) in content.files.iter().flatten().enumerate() {
            check_file(&format!("content.files[{i}]"), file, skip, errs);
        }
        for (i, r) in content.refs.iter().flatten().enumerate() {
            let at = format!("content.refs[{i}]");
            if !present(&r.uri) {
                errs.push(MetadataViolation::MissingField(format!("{at}.uri")));
            }
            check_file(&at, &r.file, skip, errs);
        }
    }

    if let Some(royalty) = &meta.royalty {
        check_royalty(royalty, errs);
    }
}

/// Checks a decoded JSON value as metadata.
///
/// Untrusted values are read leniently: an out-of-range or wrong-typed `v`,
/// `p`, `type`, `name`, `desc`, `ticker` or file `size` is reported and the
/// remaining rules still run. A non-object, or a wrong type anywhere else,
/// yields [`MetadataViolation::Malformed`] after whatever was reported so
/// far.
pub fn validate_metadata_value(value: &Value) -> Result<(), Vec<MetadataViolation>> {
    let Value::Object(map) = value else {
        return Err(vec![MetadataViolation::Malformed(
            "metadata is not a JSON object".to_string(),
        )]);
    };

    let mut map = map.clone();
    let mut errs = Vec::new();
    let mut skip = Skip::new();

    let version = match map.remove("v") {
        None | Some(Value::Null) => None,
        Some(raw) => match raw.as_i64() {
            Some(v) => match u8::try_from(v) {
                Ok(v) => Some(v),
                Err(_) => {
                    errs.push(MetadataViolation::UnsupportedVersion(v));
                    skip.insert("v".to_string());
                    None
                }
            },
            None => {
                reject(&mut errs, &mut skip, "v", "integer");
                None
            }
        },
    };

    let protocols = match map.remove("p") {
        None | Some(Value::Null) => None,
        Some(Value::Array(items)) => {
            let (ids, problem) = read_protocols(&items);
            if let Some(problem) = problem {
                errs.push(problem);
                skip.insert("p".to_string());
            }
            Some(ids)
        }
        Some(_) => {
            reject(&mut errs, &mut skip, "p", "array of protocol ids");
            None
        }
    };

    for key in ["type", "name", "desc", "ticker"] {
        if map.get(key).is_some_and(|v| !v.is_string() && !v.is_null()) {
            map.remove(key);
            reject(&mut errs, &mut skip, key, "string");
        }
    }

    read_file_sizes(&mut map, &mut errs, &mut skip);

    let mut meta: GlyphMetadata = match serde_json::from_value(Value::Object(map)) {
        Ok(meta) => meta,
        Err(e) => {
            errs.push(MetadataViolation::Malformed(e.to_string()));
            return Err(errs);
        }
    };
    meta.v = version;
    meta.p = protocols;

    check_metadata(&meta, &skip, &mut errs);
    if errs.is_empty() { Ok(()) } else { Err(errs) }
}

fn reject(errs: &mut Vec<MetadataViolation>, skip: &mut Skip, field: &str, expected: &'static str) {
    errs.push(MetadataViolation::InvalidType {
        field: field.to_string(),
        expected,
    });
    skip.insert(field.to_string());
}

/// Reads a raw protocol list, keeping the ids that fit a byte.
///
/// Returns the first problem in rule order: too many entries, then the first
/// entry that is not an integer or not a byte.
fn read_protocols(items: &[Value]) -> (Vec<u8>, Option<MetadataViolation>) {
    let mut ids = Vec::with_capacity(items.len());
    let mut problem = None;

    for (i, item) in items.iter().enumerate() {
        let found = match item.as_i64() {
            Some(n) => match u8::try_from(n) {
                Ok(id) => {
                    ids.push(id);
                    continue;
                }
                Err(_) => ProtocolViolation::Unknown(n).into(),
            },
            None => MetadataViolation::InvalidType {
                field: format!("p[{i}]"),
                expected: "integer",
            },
        };
        problem.get_or_insert(found);
    }

    if problem.is_some() && items.len() > MAX_PROTOCOLS {
        problem = Some(ProtocolViolation::TooMany(items.len()).into());
    }

    (ids, problem)
}

fn read_file_sizes(map: &mut Map<String, Value>, errs: &mut Vec<MetadataViolation>, skip: &mut Skip) {
    let Some(Value::Object(content)) = map.get_mut("content") else {
        return;
    };

    if let Some(Value::Object(file)) = content.get_mut("primary") {
        read_file_size("content.primary", file, errs, skip);
    }

    for list in ["files", "refs"] {
        let Some(Value::Array(items)) = content.get_mut(list) else {
            continue;
        };
        for (i, item) in items.iter_mut().enumerate() {
            if let Value::Object(file) = item {
                read_file_size(&format!("content.{list}[{i}]"), file, errs, skip);
            }
        }
    }
}

fn read_file_size(
    at: &str,
    file: &mut Map<String, Value>,
    errs: &mut Vec<MetadataViolation>,
    skip: &mut Skip,
) {
    let invalid = file
        .get("size")
        .is_some_and(|size| !size.is_null() && size.as_u64().is_none());
    if invalid {
        file.remove("size");
        reject(errs, skip, &format!("{at}.size"), "non-negative integer");
    }
}

/// Broad classification of a token by its protocols.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Plain fungible token.
    FungibleToken,
    /// Fungible token minted by proof of work.
    DmintToken,
    /// WAVE name.
    WaveName,
    /// Authority token.
    Authority,
    /// Container.
    Container,
    /// Encrypted NFT.
    EncryptedNft,
    /// Mutable NFT.
    MutableNft,
    /// Plain NFT.
    Nft,
    /// Data storage.
    DataStorage,
    /// None of the above.
    Unknown,
}

impl TokenKind {
    /// Human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            TokenKind::FungibleToken => "Fungible Token",
            TokenKind::DmintToken => "dMint FT",
            TokenKind::WaveName => "WAVE Name",
            TokenKind::Authority => "Authority",
            TokenKind::Container => "Container",
            TokenKind::EncryptedNft => "Encrypted NFT",
            TokenKind::MutableNft => "Mutable NFT",
            TokenKind::Nft => "NFT",
            TokenKind::DataStorage => "Data Storage",
            TokenKind::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classifies a token by its protocols.
pub fn get_token_type(protocols: &[u8]) -> TokenKind {
    let has = |p: ProtocolId| protocols.contains(&p.as_u8());

    if has(ProtocolId::Ft) {
        return if has(ProtocolId::Dmint) {
            TokenKind::DmintToken
        } else {
            TokenKind::FungibleToken
        };
    }

    if has(ProtocolId::Nft) {
        return if has(ProtocolId::Wave) {
            TokenKind::WaveName
        } else if has(ProtocolId::Authority) {
            TokenKind::Authority
        } else if has(ProtocolId::Container) {
            TokenKind::Container
        } else if has(ProtocolId::Encrypted) {
            TokenKind::EncryptedNft
        } else if has(ProtocolId::Mut) {
            TokenKind::MutableNft
        } else {
            TokenKind::Nft
        };
    }

    if has(ProtocolId::Dat) {
        return TokenKind::DataStorage;
    }

    TokenKind::Unknown
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::metadata::{Content, ExternalRef, RoyaltySplit, Section};
    use crate::protocol::SectionKind;

    #[test]
    fn test_protocol_table() {
        let cases: &[(&[u8], bool)] = &[
            (&[1], true),
            (&[2], true),
            (&[1, 2], false),
            (&[4], false),
            (&[1, 4], true),
            (&[9], false),
            (&[2, 8, 9], true),
            (&[11], false),
            (&[2, 5, 11], true),
            (&[6], false),
            (&[1, 6], true),
        ];

        for (protocols, valid) in cases {
            assert_eq!(
                validate_protocols(protocols).is_ok(),
                *valid,
                "protocols {protocols:?}"
            );
        }
    }

    #[test]
    fn test_protocol_messages() {
        let msg = |p: &[u8]| validate_protocols(p).unwrap_err().to_string();

        assert!(msg(&[1, 2]).contains("mutually exclusive"));
        assert!(msg(&[4]).contains("requires"));
        assert_eq!(msg(&[4]), "DMINT requires FT");
        assert_eq!(msg(&[9]), "TIMELOCK requires ENCRYPTED");
        assert_eq!(msg(&[11]), "WAVE requires NFT");
        assert_eq!(msg(&[2, 11]), "WAVE requires MUT");
        assert_eq!(msg(&[6]), "BURN cannot be used alone");
    }

    #[test]
    fn test_protocol_priority() {
        // Structural problems come first.
        assert_eq!(validate_protocols(&[]), Err(ProtocolViolation::Empty));
        assert_eq!(validate_protocols(&[1; 17]), Err(ProtocolViolation::TooMany(17)));
        assert_eq!(validate_protocols(&[1; 16]), Ok(()));
        assert_eq!(validate_protocols(&[2, 0]), Err(ProtocolViolation::Unknown(0)));

        // Exclusion before dependencies.
        assert_eq!(
            validate_protocols(&[1, 2, 9]),
            Err(ProtocolViolation::MutuallyExclusive(ProtocolId::Ft, ProtocolId::Nft))
        );

        // Dependencies before standalone.
        assert_eq!(
            validate_protocols(&[5]),
            Err(ProtocolViolation::MissingDependency {
                protocol: ProtocolId::Mut,
                requires: ProtocolId::Nft,
            })
        );

        // Burn with only a data protocol.
        assert_eq!(
            validate_protocols(&[3, 6]),
            Err(ProtocolViolation::BurnWithoutToken)
        );
        assert_eq!(validate_protocols(&[6, 6]), Err(ProtocolViolation::Standalone(ProtocolId::Burn)));
    }

    fn file() -> FileEntry {
        FileEntry::for_bytes("image.png", "image/png", b"not really a png")
    }

    fn valid_nft() -> GlyphMetadata {
        GlyphMetadata::new("art", &[ProtocolId::Nft])
            .with_version(2)
            .with_name("Sunrise")
            .with_content(Content::with_primary(file()))
    }

    fn royalty(bps: i64, splits: Option<&[i64]>) -> Royalty {
        Royalty {
            bps: Some(bps),
            address: Some("1BoatSLRHtKNngkdXEeobR76b53LETtpyT".to_string()),
            splits: splits.map(|s| {
                s.iter()
                    .map(|&bps| RoyaltySplit {
                        address: Some("addr".to_string()),
                        bps: Some(bps),
                        ..Default::default()
                    })
                    .collect()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_records() {
        assert_eq!(validate_metadata(&valid_nft()), Ok(()));

        let ft = GlyphMetadata::new("token", &[ProtocolId::Ft])
            .with_version(1)
            .with_ticker("GLY");
        assert_eq!(validate_metadata(&ft), Ok(()));

        let mut section = Section::new();
        section.insert("algo".to_string(), json!("sha256d"));
        let dmint = GlyphMetadata::new("token", &[ProtocolId::Ft, ProtocolId::Dmint])
            .with_version(2)
            .with_ticker("PoW")
            .with_section(SectionKind::Dmint, section);
        assert_eq!(validate_metadata(&dmint), Ok(()));
    }

    #[test]
    fn test_reports_every_violation() {
        let meta = GlyphMetadata {
            v: Some(7),
            name: Some("n".repeat(MAX_NAME_LEN + 1)),
            desc: Some("d".repeat(MAX_DESC_LEN)),
            ..Default::default()
        };

        let errs = validate_metadata(&meta).unwrap_err();
        assert_eq!(
            errs,
            vec![
                MetadataViolation::UnsupportedVersion(7),
                MetadataViolation::MissingType,
                MetadataViolation::MissingProtocols,
                MetadataViolation::TooLong {
                    field: "name".to_string(),
                    len: MAX_NAME_LEN + 1,
                    limit: MAX_NAME_LEN,
                },
            ]
        );
    }

    #[test]
    fn test_name_measured_in_bytes() {
        // 86 three-byte characters: 86 chars, 258 bytes.
        let meta = valid_nft().with_name("€".repeat(86));
        let errs = validate_metadata(&meta).unwrap_err();
        assert!(matches!(&errs[..], [MetadataViolation::TooLong { len: 258, .. }]));
    }

    #[test]
    fn test_protocol_requirements() {
        let nft = GlyphMetadata::new("art", &[ProtocolId::Nft, ProtocolId::Container, ProtocolId::Encrypted])
            .with_version(2);
        let errs = validate_metadata(&nft).unwrap_err();
        assert_eq!(
            errs,
            vec![
                MetadataViolation::ProtocolRequires {
                    protocol: ProtocolId::Nft,
                    field: "content.primary",
                },
                MetadataViolation::ProtocolRequires {
                    protocol: ProtocolId::Container,
                    field: "container",
                },
                MetadataViolation::ProtocolRequires {
                    protocol: ProtocolId::Encrypted,
                    field: "crypto",
                },
            ]
        );

        let ft = GlyphMetadata::new("token", &[ProtocolId::Ft]).with_version(2);
        let errs = validate_metadata(&ft).unwrap_err();
        assert_eq!(
            errs,
            vec![MetadataViolation::ProtocolRequires {
                protocol: ProtocolId::Ft,
                field: "ticker",
            }]
        );

        // Content stands in for a ticker.
        let ft = ft.with_content(Content::default());
        assert_eq!(validate_metadata(&ft), Ok(()));

        // Protocol errors are reported alongside field errors.
        let bad = GlyphMetadata::new("token", &[ProtocolId::Dmint]).with_version(2);
        let errs = validate_metadata(&bad).unwrap_err();
        assert_eq!(
            errs,
            vec![
                MetadataViolation::Protocols(ProtocolViolation::MissingDependency {
                    protocol: ProtocolId::Dmint,
                    requires: ProtocolId::Ft,
                }),
                MetadataViolation::ProtocolRequires {
                    protocol: ProtocolId::Dmint,
                    field: "dmint",
                },
            ]
        );
    }

    #[test]
    fn test_file_fields() {
        let content = Content {
            primary: Some(FileEntry {
                path: Some("p".repeat(MAX_PATH_LEN + 1)),
                mime: Some(String::new()),
                ..Default::default()
            }),
            files: Some(vec![file()]),
            refs: Some(vec![ExternalRef {
                uri: None,
                file: file(),
            }]),
            ..Default::default()
        };
        let meta = valid_nft().with_content(content);

        let errs = validate_metadata(&meta).unwrap_err();
        let fields: Vec<String> = errs.iter().map(ToString::to_string).collect();
        assert_eq!(
            fields,
            vec![
                "content.primary.path is 513 bytes, exceeds 512",
                "missing content.primary.mime",
                "missing content.primary.size",
                "missing content.primary.hash",
                "missing content.refs[0].uri",
            ]
        );
    }

    #[test]
    fn test_royalty() {
        let ok = |r: Royalty| validate_metadata(&valid_nft().with_royalty(r));

        assert_eq!(ok(royalty(500, None)), Ok(()));
        assert_eq!(ok(royalty(500, Some(&[250, 250]))), Ok(()));
        assert_eq!(ok(royalty(0, Some(&[]))), Ok(()));
        assert_eq!(ok(royalty(0, Some(&[0, 0]))), Ok(()));
        assert_eq!(ok(royalty(10_000, None)), Ok(()));

        assert_eq!(
            ok(royalty(500, Some(&[250, 200]))),
            Err(vec![MetadataViolation::RoyaltySplitMismatch {
                expected: 500,
                actual: 450,
            }])
        );
        assert_eq!(
            ok(royalty(500, Some(&[]))),
            Err(vec![MetadataViolation::RoyaltySplitMismatch {
                expected: 500,
                actual: 0,
            }])
        );
        assert_eq!(
            ok(royalty(10_001, None)),
            Err(vec![MetadataViolation::RoyaltyBpsOutOfRange(10_001)])
        );
        assert_eq!(
            ok(royalty(-1, None)),
            Err(vec![MetadataViolation::RoyaltyBpsOutOfRange(-1)])
        );

        let mut no_addr = royalty(100, None);
        no_addr.address = None;
        assert_eq!(
            ok(no_addr),
            Err(vec![MetadataViolation::MissingField("royalty.address".to_string())])
        );
    }

    #[test]
    fn test_validate_value() {
        let value = json!({ "v": 2, "type": "token", "p": [1], "ticker": "GLY" });
        assert_eq!(validate_metadata_value(&value), Ok(()));

        let errs = validate_metadata_value(&json!({ "type": "token", "p": "1" })).unwrap_err();
        assert_eq!(
            errs,
            vec![
                MetadataViolation::InvalidType {
                    field: "p".to_string(),
                    expected: "array of protocol ids",
                },
                MetadataViolation::MissingVersion,
            ]
        );

        let errs = validate_metadata_value(&json!([1, 2])).unwrap_err();
        assert!(matches!(&errs[..], [MetadataViolation::Malformed(_)]));

        // Wrong types outside the leniently read fields still end the check.
        let value = json!({ "v": 300, "type": "token", "p": [1], "royalty": "lots" });
        let errs = validate_metadata_value(&value).unwrap_err();
        assert!(matches!(
            &errs[..],
            [MetadataViolation::UnsupportedVersion(300), MetadataViolation::Malformed(_)]
        ));
    }

    #[test]
    fn test_value_out_of_range_version() {
        let value = json!({ "v": 300, "type": "", "p": [2], "name": "x".repeat(300) });
        let errs = validate_metadata_value(&value).unwrap_err();
        assert_eq!(
            errs,
            vec![
                MetadataViolation::UnsupportedVersion(300),
                MetadataViolation::MissingType,
                MetadataViolation::TooLong {
                    field: "name".to_string(),
                    len: 300,
                    limit: MAX_NAME_LEN,
                },
                MetadataViolation::ProtocolRequires {
                    protocol: ProtocolId::Nft,
                    field: "content.primary",
                },
            ]
        );

        let errs = validate_metadata_value(&json!({ "v": "2", "type": "t", "p": [3] })).unwrap_err();
        assert_eq!(
            errs,
            vec![MetadataViolation::InvalidType {
                field: "v".to_string(),
                expected: "integer",
            }]
        );

        let errs = validate_metadata_value(&json!({ "v": -1, "type": "t", "p": [3] })).unwrap_err();
        assert_eq!(errs, vec![MetadataViolation::UnsupportedVersion(-1)]);
    }

    #[test]
    fn test_value_out_of_range_protocol() {
        let value = json!({ "v": 2, "type": "art", "p": [2, 999], "name": "x".repeat(300) });
        let errs = validate_metadata_value(&value).unwrap_err();
        assert_eq!(
            errs,
            vec![
                MetadataViolation::Protocols(ProtocolViolation::Unknown(999)),
                MetadataViolation::TooLong {
                    field: "name".to_string(),
                    len: 300,
                    limit: MAX_NAME_LEN,
                },
                // The valid ids still drive the protocol-specific rules.
                MetadataViolation::ProtocolRequires {
                    protocol: ProtocolId::Nft,
                    field: "content.primary",
                },
            ]
        );

        let errs = validate_metadata_value(&json!({ "v": 2, "type": "t", "p": [3, "x"] }))
            .unwrap_err();
        assert_eq!(
            errs,
            vec![MetadataViolation::InvalidType {
                field: "p[1]".to_string(),
                expected: "integer",
            }]
        );

        let mut many = vec![json!(1); MAX_PROTOCOLS];
        many.push(json!(400));
        let errs = validate_metadata_value(&json!({ "v": 2, "type": "t", "p": many, "ticker": "T" }))
            .unwrap_err();
        assert_eq!(
            errs,
            vec![MetadataViolation::Protocols(ProtocolViolation::TooMany(
                MAX_PROTOCOLS + 1
            ))]
        );
    }

    #[test]
    fn test_value_wrong_typed_fields() {
        let mut primary = serde_json::to_value(file()).unwrap();
        primary["size"] = json!("10");
        let value = json!({
            "v": 2,
            "type": 5,
            "p": [1],
            "ticker": ["GLY"],
            "desc": "d".repeat(MAX_DESC_LEN + 1),
            "content": { "primary": primary, "files": [{ "path": "a", "size": -3 }] },
        });

        let errs = validate_metadata_value(&value).unwrap_err();
        assert_eq!(
            errs,
            vec![
                MetadataViolation::InvalidType {
                    field: "type".to_string(),
                    expected: "string",
                },
                MetadataViolation::InvalidType {
                    field: "ticker".to_string(),
                    expected: "string",
                },
                MetadataViolation::InvalidType {
                    field: "content.primary.size".to_string(),
                    expected: "non-negative integer",
                },
                MetadataViolation::InvalidType {
                    field: "content.files[0].size".to_string(),
                    expected: "non-negative integer",
                },
                MetadataViolation::TooLong {
                    field: "desc".to_string(),
                    len: MAX_DESC_LEN + 1,
                    limit: MAX_DESC_LEN,
                },
                MetadataViolation::MissingField("content.files[0].mime".to_string()),
                MetadataViolation::MissingField("content.files[0].hash".to_string()),
            ]
        );
    }

    #[test]
    fn test_token_type() {
        assert_eq!(get_token_type(&[1]), TokenKind::FungibleToken);
        assert_eq!(get_token_type(&[1, 4]), TokenKind::DmintToken);
        assert_eq!(get_token_type(&[2]), TokenKind::Nft);
        assert_eq!(get_token_type(&[2, 5]), TokenKind::MutableNft);
        assert_eq!(get_token_type(&[2, 5, 11]), TokenKind::WaveName);
        assert_eq!(get_token_type(&[2, 10]), TokenKind::Authority);
        assert_eq!(get_token_type(&[2, 7]), TokenKind::Container);
        assert_eq!(get_token_type(&[2, 8, 9]), TokenKind::EncryptedNft);
        assert_eq!(get_token_type(&[3]), TokenKind::DataStorage);
        assert_eq!(get_token_type(&[6]), TokenKind::Unknown);
        assert_eq!(get_token_type(&[]).to_string(), "Unknown");
        assert_eq!(get_token_type(&[1, 4]).to_string(), "dMint FT");
    }
}
