use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use shared::{LineItem, Ticket};
use tempfile::TempDir;
use turi_receipt::{
    Align, Color, ExportFormat, FixedClock, ReceiptDocument, ReceiptRenderer, ReceiptTemplate,
    Rect, RowKind,
};

const BODY_BOTTOM: f64 = 272.0;

fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 22)
        .unwrap()
        .and_hms_opt(h, m, s)
        .unwrap()
}

fn ticket(total: Decimal) -> Ticket {
    Ticket {
        id: 41,
        correlative_number: 1042,
        created_at: at(14, 32, 15),
        username: "maria".into(),
        location_name: "Main Street".into(),
        payment_type: "card".into(),
        total_amount: total,
    }
}

fn item(name: &str, cents: i64, quantity: i64) -> LineItem {
    LineItem {
        item_name: name.into(),
        unit_price: Decimal::new(cents, 2),
        quantity,
    }
}

fn many(n: usize) -> Vec<LineItem> {
    (0..n)
        .map(|i| item(&format!("Item {}", i), 100 + i as i64, 1 + (i % 3) as i64))
        .collect()
}

fn renderer() -> ReceiptRenderer<FixedClock> {
    ReceiptRenderer::with_clock(ReceiptTemplate::default(), FixedClock(at(18, 5, 0)))
}

fn total_box(doc: &ReceiptDocument) -> (usize, Rect) {
    let accent = ReceiptTemplate::default().colors.accent;
    doc.pages
        .iter()
        .find_map(|page| {
            page.rects()
                .find(|r| r.fill == accent)
                .map(|r| (page.number, r.clone()))
        })
        .expect("total box")
}

#[test]
fn test_scenario_coffee_and_muffin() {
    let items = [item("Coffee", 499, 2), item("Muffin", 999, 1)];
    let doc = renderer()
        .render(&ticket(Decimal::new(1997, 2)), &items)
        .unwrap();

    assert_eq!(doc.page_count(), 1);
    let rows: Vec<_> = doc.body_rows().map(|(_, _, row)| row).collect();
    assert_eq!(rows.len(), 2);

    assert_eq!(rows[0].cell_text(0).as_deref(), Some("2"));
    assert_eq!(rows[0].cell_text(1).as_deref(), Some("Coffee"));
    assert_eq!(rows[0].cell_text(2).as_deref(), Some("$4.99"));
    assert_eq!(rows[0].cell_text(3).as_deref(), Some("$9.98"));
    assert_eq!(rows[1].cell_text(3).as_deref(), Some("$9.99"));

    assert_eq!(rows[0].cells[0].align, Align::Center);
    assert_eq!(rows[0].cells[3].align, Align::Right);

    let page = &doc.pages[0];
    assert!(page.find_text("$19.97").is_some());
    assert!(page.find_text("TOTAL:").is_some());
    assert!(page.find_text("2 items").is_some());
}

#[test]
fn test_total_is_stored_amount_not_item_sum() {
    let items = [item("Coffee", 499, 2), item("Muffin", 999, 1)];
    let doc = renderer()
        .render(&ticket(Decimal::new(2500, 2)), &items)
        .unwrap();
    let page = &doc.pages[0];
    assert!(page.find_text("$25.00").is_some());
    assert!(page.find_text("$19.97").is_none());
}

#[test]
fn test_subtotal_rounds_half_up() {
    let odd = LineItem {
        item_name: "Bulk".into(),
        unit_price: Decimal::new(3335, 3),
        quantity: 1,
    };
    let doc = renderer().render(&ticket(Decimal::ONE), &[odd]).unwrap();
    let (_, _, row) = doc.body_rows().next().unwrap();
    assert_eq!(row.cell_text(2).as_deref(), Some("$3.34"));
    assert_eq!(row.cell_text(3).as_deref(), Some("$3.34"));
}

#[test]
fn test_rendering_is_deterministic() {
    let t = ticket(Decimal::new(123456, 2));
    let items = many(75);

    let a = renderer().render(&t, &items).unwrap();
    let b = renderer().render(&t, &items).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.to_json().unwrap(), b.to_json().unwrap());
}

#[test]
fn test_only_footer_depends_on_render_time() {
    let t = ticket(Decimal::new(1997, 2));
    let items = many(3);
    let early = ReceiptRenderer::with_clock(ReceiptTemplate::default(), FixedClock(at(8, 0, 0)))
        .render(&t, &items)
        .unwrap();
    let late = ReceiptRenderer::with_clock(ReceiptTemplate::default(), FixedClock(at(23, 0, 0)))
        .render(&t, &items)
        .unwrap();

    assert_ne!(early, late);
    assert!(early.pages[0].find_text("Generated on 2024-01-22 08:00:00").is_some());
    assert!(late.pages[0].find_text("Generated on 2024-01-22 23:00:00").is_some());

    let strip = |doc: &ReceiptDocument| -> Vec<String> {
        doc.pages
            .iter()
            .flat_map(|p| p.texts())
            .filter(|r| !r.text.starts_with("Generated on"))
            .map(|r| r.text.clone())
            .collect()
    };
    assert_eq!(strip(&early), strip(&late));
}

#[test]
fn test_many_items_paginate_in_order() {
    let items = many(120);
    let doc = renderer()
        .render(&ticket(Decimal::new(99999, 2)), &items)
        .unwrap();
    assert!(doc.page_count() >= 2);

    // Each item exactly once, in input order
    let indices: Vec<_> = doc.body_rows().map(|(_, index, _)| index).collect();
    assert_eq!(indices, (0..120).collect::<Vec<_>>());
    for (_, index, row) in doc.body_rows() {
        assert_eq!(row.cell_text(1), Some(format!("Item {}", index)));
    }

    for page in &doc.pages {
        let rows: Vec<_> = page.rows().collect();
        if !rows.iter().any(|r| !r.is_header()) {
            continue;
        }
        assert!(rows[0].is_header(), "page {} starts without a header", page.number);
        assert_eq!(rows.iter().filter(|r| r.is_header()).count(), 1);

        // Stacked without overlap, above the footer area
        for pair in rows.windows(2) {
            assert!(pair[1].y >= pair[0].bottom() - 1e-9);
        }
        assert!(rows.iter().all(|r| r.bottom() <= BODY_BOTTOM + 1e-6));
    }
}

#[test]
fn test_total_box_follows_last_row() {
    let mut moved_to_new_page = false;

    for n in 1..80 {
        let doc = renderer()
            .render(&ticket(Decimal::new(500, 2)), &many(n))
            .unwrap();
        let (last_page, _, last_row) = doc.body_rows().last().unwrap();
        let (box_page, rect) = total_box(&doc);

        assert!(rect.y + rect.height <= BODY_BOTTOM + 1e-6, "n={}", n);
        if box_page == last_page {
            assert!((rect.y - (last_row.bottom() + 2.0)).abs() < 1e-9, "n={}", n);
        } else {
            assert_eq!(box_page, last_page + 1, "n={}", n);
            assert_eq!(rect.y, 20.0);
            moved_to_new_page = true;
        }
        assert_eq!(doc.page_count(), box_page);
    }

    assert!(moved_to_new_page);
}

#[test]
fn test_footer_on_every_page() {
    let doc = renderer()
        .render(&ticket(Decimal::new(1000, 2)), &many(150))
        .unwrap();
    let total = doc.page_count();
    assert!(total >= 3);

    for page in &doc.pages {
        let thanks = page.find_text("Thank you for your purchase").unwrap();
        assert_eq!(thanks.y, 297.0 - 15.0);
        assert_eq!(thanks.align, Align::Center);
        assert!(page.find_text("Generated on 2024-01-22 18:05:00").is_some());
        let numbering = format!("Page {} of {}", page.number, total);
        assert!(page.find_text(&numbering).is_some(), "missing '{}'", numbering);
    }
}

#[test]
fn test_no_items() {
    let doc = renderer()
        .render(&ticket(Decimal::new(1250, 2)), &[])
        .unwrap();

    assert_eq!(doc.page_count(), 1);
    assert_eq!(doc.body_rows().count(), 0);
    let page = &doc.pages[0];
    assert!(page.rows().next().unwrap().is_header());
    assert!(page.find_text("No items").is_some());
    assert!(page.find_text("$12.50").is_some());
    assert!(page.find_text("0 items").is_some());

    let header = page.rows().next().unwrap();
    let (_, rect) = total_box(&doc);
    assert!(rect.y > header.bottom());
}

#[test]
fn test_long_description_wraps() {
    let long = "Seasonal pumpkin spice latte with extra oat milk, cinnamon and a double shot";
    let doc = renderer()
        .render(&ticket(Decimal::ONE), &[item(long, 550, 1), item("Tea", 200, 1)])
        .unwrap();
    let rows: Vec<_> = doc.body_rows().map(|(_, _, r)| r).collect();

    assert!(rows[0].cells[1].lines.len() > 1);
    assert_eq!(rows[0].cell_text(1).as_deref(), Some(long));
    assert!(rows[0].height > rows[1].height);
    assert!(rows[1].y >= rows[0].bottom());
}

#[test]
fn test_striped_rows() {
    let doc = renderer().render(&ticket(Decimal::ONE), &many(4)).unwrap();
    let stripe = ReceiptTemplate::default().colors.stripe;
    let fills: Vec<_> = doc.body_rows().map(|(_, _, r)| r.fill).collect();
    assert_eq!(fills, vec![None, Some(stripe), None, Some(stripe)]);

    let header = doc.pages[0].rows().next().unwrap();
    assert_eq!(header.kind, RowKind::Header);
    assert_eq!(header.fill, Some(Color(41, 98, 255)));
}

#[test]
fn test_export_writes_printable_pdf() {
    let temp_dir = TempDir::new().unwrap();
    let doc = renderer()
        .render(&ticket(Decimal::new(1997, 2)), &many(120))
        .unwrap();
    assert!(doc.page_count() > 1);

    let path = doc
        .save_to_dir(&temp_dir.path().join("exports"), ExportFormat::Pdf)
        .unwrap();
    assert_eq!(path.file_name().unwrap(), "Ticket_1042.pdf");

    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
    let pdf = lopdf::Document::load_mem(&bytes).unwrap();
    assert_eq!(pdf.get_pages().len(), doc.page_count());
}

#[test]
fn test_export_writes_draw_list_json() {
    let temp_dir = TempDir::new().unwrap();
    let doc = renderer()
        .render(&ticket(Decimal::new(1997, 2)), &many(2))
        .unwrap();

    let path = doc
        .save_to_dir(&temp_dir.path().join("exports"), ExportFormat::Json)
        .unwrap();
    assert_eq!(path.file_name().unwrap(), "Ticket_1042.json");

    let json = std::fs::read_to_string(&path).unwrap();
    assert_eq!(json, doc.to_json().unwrap());
    let saved: ReceiptDocument = serde_json::from_str(&json).unwrap();
    assert_eq!(saved.name, "Ticket_1042");
    assert_eq!(saved.page_count(), doc.page_count());
}
