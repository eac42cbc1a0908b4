//! Reading references to other registry entities.

use crate::diagnostics::DiagnosticSink;
use crate::error::Result;
use crate::xml::{Namespace, XmlCursor};

/// Read a reference element holding the code of another entity, e.g.
/// `<pai:KatastralniUzemi><kui:Kod>600016</kui:Kod></pai:KatastralniUzemi>`.
///
/// `namespace` is the vocabulary of the referenced entity.
pub fn read_kod_reference(
    cursor: &mut XmlCursor,
    sink: &mut dyn DiagnosticSink,
    namespace: Namespace,
) -> Result<Option<i32>> {
    let depth = cursor.depth();
    let mut kod = None;

    while let Some(child) = cursor.next_child(depth)? {
        if child.is(namespace, "Kod") {
            kod = Some(cursor.read_parsed()?);
        } else {
            cursor.skip_unknown(sink)?;
        }
    }

    Ok(kod)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Diagnostic;

    #[test]
    fn test_read_kod_reference() {
        let xml = r#"<pai:KatastralniUzemi
            xmlns:pai="urn:cz:isvs:ruian:schemas:ParcelaIntTypy:v1"
            xmlns:kui="urn:cz:isvs:ruian:schemas:KatUzIntTypy:v1">
            <kui:Nazev>Praha</kui:Nazev>
            <kui:Kod>600016</kui:Kod>
        </pai:KatastralniUzemi>"#;
        let mut cursor = XmlCursor::from_xml(xml);
        let mut sink: Vec<Diagnostic> = Vec::new();
        cursor.next_token().unwrap();

        let kod = read_kod_reference(&mut cursor, &mut sink, Namespace::KatastralniUzemi).unwrap();

        assert_eq!(kod, Some(600016));
        assert_eq!(sink.len(), 1);
        assert_eq!(cursor.depth(), 0);
    }

    #[test]
    fn test_kod_in_wrong_namespace_is_not_a_reference() {
        let xml = r#"<o:Okres xmlns:o="urn:cz:isvs:ruian:schemas:ObecIntTypy:v1"><o:Kod>1</o:Kod></o:Okres>"#;
        let mut cursor = XmlCursor::from_xml(xml);
        let mut sink: Vec<Diagnostic> = Vec::new();
        cursor.next_token().unwrap();

        let kod = read_kod_reference(&mut cursor, &mut sink, Namespace::Okres).unwrap();

        assert_eq!(kod, None);
        assert_eq!(sink.len(), 1);
    }
}
