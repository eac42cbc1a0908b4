//! XML namespaces of the RÚIAN exchange format.

/// Vocabularies used by exchange format documents.
///
/// The meaning of an element is the pair (namespace, local name): several
/// vocabularies reuse local names such as `Kod` or `Nazev`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    /// Document envelope and collection elements (`vf:`).
    VymennyFormat,
    /// Types shared by several entities (`com:`).
    Common,
    /// Base types (`base:`).
    Base,
    /// State (`sti:`).
    Stat,
    /// District (`oki:`).
    Okres,
    /// Municipality (`obi:`).
    Obec,
    /// Municipality with extended powers (`poi:`).
    Pou,
    /// Street (`uli:`).
    Ulice,
    /// Cadastral area (`kui:`).
    KatastralniUzemi,
    /// Land parcel (`pai:`).
    Parcela,
    /// Building (`soi:`).
    StavebniObjekt,
    /// Address point (`ami:`).
    AdresniMisto,
    /// GML 3.2 geometry.
    Gml,
}

impl Namespace {
    const ALL: [Namespace; 13] = [
        Namespace::VymennyFormat,
        Namespace::Common,
        Namespace::Base,
        Namespace::Stat,
        Namespace::Okres,
        Namespace::Obec,
        Namespace::Pou,
        Namespace::Ulice,
        Namespace::KatastralniUzemi,
        Namespace::Parcela,
        Namespace::StavebniObjekt,
        Namespace::AdresniMisto,
        Namespace::Gml,
    ];

    /// Namespace URI as it appears in `xmlns` declarations.
    #[must_use]
    pub fn uri(self) -> &'static str {
        match self {
            Namespace::VymennyFormat => "urn:cz:isvs:ruian:schemas:VymennyFormatTypy:v1",
            Namespace::Common => "urn:cz:isvs:ruian:schemas:CommonTypy:v1",
            Namespace::Base => "urn:cz:isvs:ruian:schemas:BaseTypy:v1",
            Namespace::Stat => "urn:cz:isvs:ruian:schemas:StatIntTypy:v1",
            Namespace::Okres => "urn:cz:isvs:ruian:schemas:OkresIntTypy:v1",
            Namespace::Obec => "urn:cz:isvs:ruian:schemas:ObecIntTypy:v1",
            Namespace::Pou => "urn:cz:isvs:ruian:schemas:PouIntTypy:v1",
            Namespace::Ulice => "urn:cz:isvs:ruian:schemas:UliceIntTypy:v1",
            Namespace::KatastralniUzemi => "urn:cz:isvs:ruian:schemas:KatUzIntTypy:v1",
            Namespace::Parcela => "urn:cz:isvs:ruian:schemas:ParcelaIntTypy:v1",
            Namespace::StavebniObjekt => "urn:cz:isvs:ruian:schemas:StavObjIntTypy:v1",
            Namespace::AdresniMisto => "urn:cz:isvs:ruian:schemas:AdrMistoIntTypy:v1",
            Namespace::Gml => "http://www.opengis.net/gml/3.2",
        }
    }

    /// Look up a namespace by URI.
    ///
    /// # Examples
    /// ```
    /// use ruian_import::xml::Namespace;
    ///
    /// assert_eq!(
    ///     Namespace::from_uri("urn:cz:isvs:ruian:schemas:CommonTypy:v1"),
    ///     Some(Namespace::Common)
    /// );
    /// assert_eq!(Namespace::from_uri("urn:example"), None);
    /// ```
    #[must_use]
    pub fn from_uri(uri: &str) -> Option<Namespace> {
        Self::ALL.into_iter().find(|ns| ns.uri() == uri)
    }
}
