use std::path::PathBuf;

use super::*;

#[test]
fn error_display_file_read() {
    let err = QcError::FileRead {
        path: PathBuf::from("bundle.xqar"),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
    };
    assert!(err.to_string().contains("bundle.xqar"));
}

#[test]
fn error_display_xml_parse() {
    let err = QcError::XmlParse {
        path: PathBuf::from("broken.xqar"),
        message: "unexpected end of stream".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "XML parse error in broken.xqar: unexpected end of stream"
    );
}

#[test]
fn error_type_returns_correct_type() {
    assert_eq!(QcError::XmlWrite("x".to_string()).error_type(), "XmlWrite");
    assert_eq!(QcError::Pooling("x".to_string()).error_type(), "Pooling");
    assert_eq!(
        QcError::Io(std::io::Error::other("test")).error_type(),
        "IO"
    );
    assert_eq!(
        QcError::XmlParse {
            path: PathBuf::from("a.xml"),
            message: "x".to_string(),
        }
        .error_type(),
        "XmlParse"
    );
}

#[test]
fn message_omits_category_prefix() {
    let err = QcError::Pooling("directory does not exist".to_string());
    assert_eq!(err.message(), "directory does not exist");

    let err = QcError::XmlParse {
        path: PathBuf::from("r.xqar"),
        message: "bad token".to_string(),
    };
    assert_eq!(err.message(), "r.xqar: bad token");
}

#[test]
fn io_error_converts_with_question_mark() {
    fn fails() -> Result<()> {
        Err(std::io::Error::other("disk full"))?;
        Ok(())
    }
    let err = fails().unwrap_err();
    assert!(matches!(err, QcError::Io(_)));
}
