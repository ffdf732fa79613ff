use tag_sheet::{Font, Info, LabelItem, LabelSheet, SheetOptions, Typeface};

fn main() {
    // pass a TrueType font to embed it, otherwise the built-in Courier is used
    let typeface: Typeface = match std::env::args().nth(1) {
        Some(path) => Font::from_file(path).expect("can load font").into(),
        None => Typeface::default(),
    };

    let sheet = LabelSheet::new(typeface).with_options(
        SheetOptions::default()
            .with_url_template("https://moves.example/tag/{id}")
            .with_info(Some(
                Info::new()
                    .title("Moving day")
                    .subject("Box labels")
                    .created_now()
                    .clone(),
            )),
    );

    let mut tags: Vec<(String, String)> = vec![
        ("k-001".into(), "Kitchen: plates, bowls and the good glasses".into()),
        ("k-002".into(), "Kitchen: pots".into()),
        ("b-001".into(), "Bedroom".into()),
    ];
    for n in 0..45 {
        tags.push((format!("x-{n:03}"), lipsum::lipsum_title()));
    }
    let items = LabelItem::from_tags(tags);

    let pdf = sheet.render(&items).expect("can render labels");

    // we're going to save the contents to a file on disk, but anywhere where we can write would do
    std::fs::write("labels.pdf", pdf).unwrap();
}
