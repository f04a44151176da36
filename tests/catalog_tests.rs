use album_layout::geometry::Rect;
use album_layout::layout::*;
use album_layout::models::{Page, PhotoMetadata, ZoneGeometry};

fn names(templates: &[&album_layout::models::LayoutTemplate]) -> Vec<String> {
    templates.iter().map(|t| t.name().to_string()).collect()
}

fn rects(zones: &[ZoneGeometry]) -> Vec<Rect> {
    zones.iter().map(|zone| zone.rect()).collect()
}

#[test]
fn test_full_bleed_is_the_only_single_photo_template() {
    let catalog = TemplateCatalog::new();
    let templates = catalog.templates_for(Some(1));

    assert_eq!(templates.len(), 1);
    assert_eq!(templates[0].name(), "Full Bleed");
    assert_eq!(rects(templates[0].zones()), vec![Rect::new(0.0, 0.0, 12.0, 12.0)]);
}

#[test]
fn test_templates_for_four_in_registration_order() {
    let catalog = TemplateCatalog::new();
    let templates = catalog.templates_for(Some(4));

    assert_eq!(
        names(&templates),
        vec!["Full Bleed", "Side by Side", "Hero with Two", "Four Grid"]
    );
    let counts: Vec<usize> = templates.iter().map(|t| t.photo_count()).collect();
    assert_eq!(counts, vec![1, 2, 3, 4]);
}

#[test]
fn test_builtin_geometry() {
    let catalog = TemplateCatalog::new();
    let all = catalog.templates_for(None);

    assert_eq!(
        rects(all[1].zones()),
        vec![Rect::new(0.0, 0.0, 5.9, 12.0), Rect::new(6.1, 0.0, 5.9, 12.0)]
    );
    assert_eq!(
        rects(all[2].zones()),
        vec![
            Rect::new(0.0, 0.0, 8.0, 12.0),
            Rect::new(8.1, 0.0, 3.9, 5.9),
            Rect::new(8.1, 6.1, 3.9, 5.9),
        ]
    );
    assert_eq!(
        rects(all[3].zones()),
        vec![
            Rect::new(0.0, 0.0, 5.9, 5.9),
            Rect::new(6.1, 0.0, 5.9, 5.9),
            Rect::new(0.0, 6.1, 5.9, 5.9),
            Rect::new(6.1, 6.1, 5.9, 5.9),
        ]
    );
    assert_eq!(all[4].name(), "Magazine Style");
    assert_eq!(
        rects(all[4].zones()),
        vec![
            Rect::new(0.0, 0.0, 8.0, 8.0),
            Rect::new(8.1, 0.0, 3.9, 3.9),
            Rect::new(8.1, 4.05, 3.9, 3.9),
            Rect::new(0.0, 8.1, 3.9, 3.9),
            Rect::new(4.05, 8.1, 3.9, 3.9),
            Rect::new(8.1, 8.1, 3.9, 3.9),
        ]
    );
    assert!(all.iter().all(|t| t.zones().iter().all(|z| z.z_index == 1)));
}

#[test]
fn test_photo_count_invariant_holds_for_custom_templates() {
    let mut catalog = TemplateCatalog::new();
    catalog
        .register_custom_template(
            "Filmstrip",
            (0..5)
                .map(|i| ZoneGeometry::new(i as f64 * 2.4, 4.0, 2.3, 4.0))
                .collect(),
        )
        .unwrap();

    for template in catalog.iter() {
        assert_eq!(template.photo_count(), template.zones().len());
    }
}

#[test]
fn test_custom_template_appended_after_builtins() {
    let mut catalog = TemplateCatalog::new();
    let custom_id = catalog
        .register_custom_template(
            "Triptych",
            vec![
                ZoneGeometry::new(0.0, 0.0, 3.9, 12.0),
                ZoneGeometry::new(4.05, 0.0, 3.9, 12.0),
                ZoneGeometry::new(8.1, 0.0, 3.9, 12.0),
            ],
        )
        .unwrap()
        .id();

    let templates = catalog.templates_for(Some(3));
    assert_eq!(
        names(&templates),
        vec!["Full Bleed", "Side by Side", "Hero with Two", "Triptych"]
    );
    let custom = templates.last().unwrap();
    assert_eq!(custom.id(), custom_id);
    assert_eq!(custom.category(), CUSTOM_CATEGORY);
    assert_eq!(custom.photo_count(), 3);
}

#[test]
fn test_duplicate_custom_names_are_allowed() {
    let mut catalog = TemplateCatalog::new();
    let zones = vec![ZoneGeometry::new(1.0, 1.0, 10.0, 10.0)];
    catalog.register_custom_template("Inset", zones.clone()).unwrap();
    catalog.register_custom_template("Inset", zones).unwrap();

    assert_eq!(catalog.templates_in_category(CUSTOM_CATEGORY).len(), 2);
}

#[test]
fn test_suggestions_never_exceed_selection() {
    let catalog = TemplateCatalog::new();

    for count in 0..10 {
        let photos: Vec<PhotoMetadata> = (0..count)
            .map(|i| PhotoMetadata::new(&format!("{}.jpg", i), 100, 100))
            .collect();
        let suggestions = catalog.suggestions_for(&photos);

        assert!(suggestions.len() <= MAX_SUGGESTIONS);
        assert!(suggestions.iter().all(|t| t.photo_count() <= count));
        assert!(suggestions
            .windows(2)
            .all(|pair| pair[0].photo_count() >= pair[1].photo_count()));
    }
}

#[test]
fn test_apply_twice_gives_same_geometry() {
    let catalog = TemplateCatalog::new();
    let magazine = catalog.templates_for(None)[4];
    let mut page = Page::new(2);

    apply_template(&mut page, magazine);
    let once: Vec<ZoneGeometry> = page.drop_zones.iter().map(|z| z.geometry.clone()).collect();
    apply_template(&mut page, magazine);
    let twice: Vec<ZoneGeometry> = page.drop_zones.iter().map(|z| z.geometry.clone()).collect();

    assert_eq!(once, twice);
    assert_eq!(once, magazine.zones().to_vec());
    assert_eq!(page.template.as_ref().unwrap().id, magazine.id());
}
