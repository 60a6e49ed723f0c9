#![forbid(unsafe_code)]

//! End-to-end editing session on the desktop canvas.

use std::cell::RefCell;
use std::rc::Rc;

use splitframe::prelude::*;

#[test]
fn desktop_session_from_starter_to_exports() {
    let mut doc = Document::with_starter_layout(1440.0, 900.0);
    let starter = *doc.starter().expect("starter layout");
    let changes = Rc::new(RefCell::new(0usize));
    let counter = Rc::clone(&changes);
    let _ = doc.subscribe(move |_| *counter.borrow_mut() += 1);

    // Header 90px, content row 729px, footer 81px.
    let tree = doc.tree();
    let main = tree.node(starter.main).expect("main").rect();
    assert!(main.approx_eq(&Rect::new(432.0, 90.0, 1008.0, 729.0)));
    let footer = tree.node(starter.footer).expect("footer").rect();
    assert!(footer.approx_eq(&Rect::new(0.0, 819.0, 1440.0, 81.0)));

    // Drop a card grid into the main content area.
    let cells = doc.create_grid(starter.main, 2, 2).expect("main is a leaf");
    for cell in &cells {
        let rect = doc.tree().node(*cell).expect("cell").rect();
        assert!((rect.width - 504.0).abs() < 1e-9);
        assert!((rect.height - 364.5).abs() < 1e-9);
    }
    let hit = doc.apply_tool(1200.0, 700.0, ContentType::Card).expect("leaf hit");
    assert_eq!(hit, cells[3]);
    assert_eq!(*changes.borrow(), 2);

    let html = doc.export(ExportFormat::Html).expect("html export");
    assert!(html.contains(&format!("<div id=\"{hit}\" class=\"card\">")));
    assert!(html.contains(&format!("#{hit} {{ background-color: white;")));

    let jsx = doc.export(ExportFormat::React).expect("jsx export");
    assert!(jsx.contains(&format!("<div key=\"{hit}\" id=\"{hit}\"")));
    assert!(jsx.contains("boxShadow: '0 2px 4px rgba(0,0,0,0.1)'"));

    // Switch to a phone viewport: geometry scales, structure does not.
    let before = doc.tree().len();
    assert!(doc.rescale(375.0, 667.0));
    assert_eq!(doc.tree().len(), before);
    let header = doc.tree().node(starter.header).expect("header").rect();
    assert!(header.approx_eq(&Rect::new(0.0, 0.0, 375.0, 90.0 * 667.0 / 900.0)));
    assert_eq!(*changes.borrow(), 3);
}

#[test]
fn sessions_survive_a_json_round_trip() {
    let mut doc = Document::with_starter_layout(1440.0, 900.0);
    let starter = *doc.starter().expect("starter layout");
    let _ = doc.split(starter.sidebar, SplitAxis::Horizontal, 0.5);
    let json = doc.export(ExportFormat::Json).expect("json export");

    let mut loaded = Document::from_json(&json).expect("json loads");
    assert_eq!(loaded.export(ExportFormat::Json).expect("json export"), json);

    // IDs minted after a load never collide with loaded ones.
    let max = loaded
        .tree()
        .all_nodes()
        .iter()
        .map(|region| region.id())
        .max()
        .expect("non-empty");
    let (a, b) = loaded
        .split(starter.footer, SplitAxis::Vertical, 0.5)
        .expect("footer is a leaf");
    assert!(a > max && b > max);
}

#[test]
fn malformed_json_is_reported() {
    let err = Document::from_json("{\"id\": \"region-1\"}").expect_err("not a layout");
    assert!(matches!(err, Error::Json(_)));

    let duplicate = r#"{"id":"node-1","x":0,"y":0,"width":10,"height":10,
        "content":null,"contentType":null,"backgroundColor":null,"children":[
        {"id":"node-2","x":0,"y":0,"width":10,"height":5,"content":null,"contentType":null,"backgroundColor":null,"children":[]},
        {"id":"node-2","x":0,"y":5,"width":10,"height":5,"content":null,"contentType":null,"backgroundColor":null,"children":[]}
    ]}"#;
    let err = Document::from_json(duplicate).expect_err("duplicate ids");
    assert!(matches!(err, Error::Model(_)));
    assert!(err.to_string().contains("node-2"));
}
