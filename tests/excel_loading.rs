use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use sheet_peek::convert::{to_records, to_rows};
use sheet_peek::loading::excel::load_sheet;
use sheet_peek::loading::{load_from_path, LoadOptions, SheetSelection, WorkbookFormat};
use sheet_peek::render::render_preview;
use sheet_peek::types::{DataType, Value};
use sheet_peek::SheetError;

fn tmp_file(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("sheet-peek-{name}-{nanos}.xlsx"))
}

fn write_people_xlsx(path: &PathBuf) {
    use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};

    let mut wb = Workbook::new();
    let date_format = Format::new().set_num_format("yyyy-mm-dd");

    let ws = wb.add_worksheet();
    ws.set_name("People").unwrap();

    // header
    ws.write_string(0, 0, "id").unwrap();
    ws.write_string(0, 1, "name").unwrap();
    ws.write_string(0, 2, "score").unwrap();
    ws.write_string(0, 3, "joined").unwrap();
    ws.write_string(0, 4, "active").unwrap();

    let people = [
        (1, "Ada", 98.5, (2021, 3, 4), true),
        (2, "Grace", 87.25, (2022, 11, 30), false),
        (3, "Linus", 77.0, (2023, 1, 15), true),
    ];
    for (i, (id, name, score, (y, m, d), active)) in people.iter().enumerate() {
        let row = i as u32 + 1;
        ws.write_number(row, 0, *id).unwrap();
        ws.write_string(row, 1, *name).unwrap();
        ws.write_number(row, 2, *score).unwrap();
        let date = ExcelDateTime::from_ymd(*y, *m, *d).unwrap();
        ws.write_datetime_with_format(row, 3, &date, &date_format).unwrap();
        ws.write_boolean(row, 4, *active).unwrap();
    }

    // A second sheet to exercise sheet selection.
    let ws2 = wb.add_worksheet();
    ws2.set_name("Totals").unwrap();
    ws2.write_string(0, 0, "total").unwrap();
    ws2.write_number(1, 0, 262.75).unwrap();

    wb.save(path).unwrap();
}

fn write_messy_xlsx(path: &PathBuf) {
    use rust_xlsxwriter::Workbook;

    let mut wb = Workbook::new();
    let ws = wb.add_worksheet();

    // Header starts on the third row, has a blank cell and a repeated name.
    ws.write_string(2, 0, "city").unwrap();
    ws.write_string(2, 2, "city").unwrap();
    ws.write_string(2, 3, "pop").unwrap();

    ws.write_string(3, 0, "Oslo").unwrap();
    ws.write_number(3, 1, 1).unwrap();
    ws.write_string(3, 2, "Norway").unwrap();
    ws.write_number(3, 3, 709_000).unwrap();

    // row 5 left fully empty

    ws.write_string(5, 0, "Bergen").unwrap();
    ws.write_string(5, 2, "Norway").unwrap();
    ws.write_number(5, 3, 286_000).unwrap();

    wb.save(path).unwrap();
}

#[test]
fn load_first_sheet_happy_path() {
    let path = tmp_file("people");
    write_people_xlsx(&path);

    let ds = load_from_path(&path, &LoadOptions::default()).unwrap();
    assert_eq!(ds.row_count(), 3);
    assert_eq!(
        ds.header.names().collect::<Vec<_>>(),
        vec!["id", "name", "score", "joined", "active"]
    );
    assert_eq!(ds.rows[0][0], Value::Int64(1));
    assert_eq!(ds.rows[0][1], Value::Utf8("Ada".to_string()));
    assert_eq!(ds.rows[1][2], Value::Float64(87.25));
    assert_eq!(ds.rows[1][4], Value::Bool(false));

    let joined = chrono::NaiveDate::from_ymd_opt(2021, 3, 4)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    assert_eq!(ds.rows[0][3], Value::DateTime(joined));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn every_row_is_keyed_by_the_header() {
    let path = tmp_file("keyed");
    write_people_xlsx(&path);

    let ds = load_from_path(&path, &LoadOptions::default()).unwrap();
    let rows = to_rows(&ds);
    let records = to_records(&ds);

    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| r.len() == ds.column_count()));
    assert_eq!(rows[2][1], Value::Utf8("Linus".to_string()));

    assert_eq!(records.len(), 3);
    for (record, row) in records.iter().zip(&rows) {
        assert_eq!(record.keys().collect::<Vec<_>>(), ds.header.names().collect::<Vec<_>>());
        let values: Vec<_> = record.iter().map(|(_, v)| v.clone()).collect();
        assert_eq!(&values, row);
    }

    let _ = std::fs::remove_file(&path);
}

#[test]
fn column_access_and_dtypes() {
    let path = tmp_file("columns");
    write_people_xlsx(&path);

    let ds = load_from_path(&path, &LoadOptions::default()).unwrap();
    let names = ds.column("name").unwrap();
    assert_eq!(names.dtype(), DataType::Utf8);
    assert_eq!(
        names.values().cloned().collect::<Vec<_>>(),
        vec![
            Value::Utf8("Ada".to_string()),
            Value::Utf8("Grace".to_string()),
            Value::Utf8("Linus".to_string()),
        ]
    );

    let dtypes: Vec<_> = ds.dtypes().into_iter().map(|(_, t)| t).collect();
    assert_eq!(
        dtypes,
        vec![
            DataType::Int64,
            DataType::Utf8,
            DataType::Float64,
            DataType::DateTime,
            DataType::Bool
        ]
    );

    let _ = std::fs::remove_file(&path);
}

#[test]
fn missing_column_fails_instead_of_returning_empty_data() {
    let path = tmp_file("missing-col");
    write_people_xlsx(&path);

    let ds = load_from_path(&path, &LoadOptions::default()).unwrap();
    let err = ds.column("salary").unwrap_err();
    assert!(matches!(err, SheetError::ColumnNotFound { .. }));
    assert!(err.to_string().contains("column not found: 'salary'"));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn select_sheet_by_name_and_index() {
    let path = tmp_file("sheets");
    write_people_xlsx(&path);

    let by_name = load_sheet(&path, WorkbookFormat::Xlsx, &SheetSelection::Named("Totals".into())).unwrap();
    assert_eq!(by_name.header.names().collect::<Vec<_>>(), vec!["total"]);
    assert_eq!(by_name.rows[0][0], Value::Float64(262.75));

    let by_index = load_sheet(&path, WorkbookFormat::Xlsx, &SheetSelection::Index(1)).unwrap();
    assert_eq!(by_index, by_name);

    let err = load_sheet(&path, WorkbookFormat::Xlsx, &SheetSelection::Named("Nope".into())).unwrap_err();
    assert!(err.to_string().contains("no sheet named 'Nope'"));

    let err = load_sheet(&path, WorkbookFormat::Xlsx, &SheetSelection::Index(9)).unwrap_err();
    assert!(matches!(err, SheetError::SheetNotFound { .. }));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn messy_header_and_blank_rows() {
    let path = tmp_file("messy");
    write_messy_xlsx(&path);

    let ds = load_from_path(&path, &LoadOptions::default()).unwrap();
    assert_eq!(
        ds.header.names().collect::<Vec<_>>(),
        vec!["city", "Unnamed: 1", "city.1", "pop"]
    );
    assert_eq!(ds.row_count(), 2);
    assert_eq!(ds.rows[1][0], Value::Utf8("Bergen".to_string()));
    // gap in the second column keeps it as floats
    assert_eq!(ds.rows[0][1], Value::Float64(1.0));
    assert_eq!(ds.rows[1][1], Value::Null);
    assert_eq!(ds.rows[1][3], Value::Int64(286_000));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn preview_of_head_renders_first_rows_only() {
    let path = tmp_file("preview");
    write_people_xlsx(&path);

    let ds = load_from_path(&path, &LoadOptions::default()).unwrap();
    let preview = render_preview(&ds.head(2));
    let lines: Vec<_> = preview.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("name"));
    assert!(lines[1].contains("Ada"));
    assert!(lines[2].contains("Grace"));
    assert!(!preview.contains("Linus"));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn missing_file_is_an_io_error() {
    let err = load_from_path("definitely/not/here.xlsx", &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, SheetError::Io(_)));
}

#[test]
fn unreadable_workbook_is_an_excel_error() {
    let path = tmp_file("garbage");
    std::fs::write(&path, b"this is not a zip archive").unwrap();

    let err = load_from_path(&path, &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, SheetError::Excel(_)));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn table_starting_in_column_b_keeps_sheet_positions() {
    let path = tmp_file("offset");
    {
        let mut wb = rust_xlsxwriter::Workbook::new();
        let ws = wb.add_worksheet();
        // A is empty, C1 is a blank header cell.
        ws.write_string(0, 1, "x").unwrap();
        ws.write_string(0, 3, "y").unwrap();
        ws.write_number(1, 1, 7).unwrap();
        ws.write_string(1, 2, "mid").unwrap();
        ws.write_string(1, 3, "end").unwrap();
        wb.save(&path).unwrap();
    }

    let ds = load_from_path(&path, &LoadOptions::default()).unwrap();
    assert_eq!(
        ds.header.names().collect::<Vec<_>>(),
        vec!["Unnamed: 0", "x", "Unnamed: 2", "y"]
    );
    assert_eq!(
        ds.rows[0],
        vec![
            Value::Null,
            Value::Int64(7),
            Value::Utf8("mid".to_string()),
            Value::Utf8("end".to_string())
        ]
    );

    let _ = std::fs::remove_file(&path);
}

#[test]
fn large_numeric_header_keeps_its_digits() {
    let path = tmp_file("big-header");
    {
        let mut wb = rust_xlsxwriter::Workbook::new();
        let ws = wb.add_worksheet();
        ws.write_number(0, 0, 1e20).unwrap();
        ws.write_string(0, 1, "b").unwrap();
        ws.write_number(1, 0, 1).unwrap();
        ws.write_number(1, 1, 2).unwrap();
        wb.save(&path).unwrap();
    }

    let ds = load_from_path(&path, &LoadOptions::default()).unwrap();
    assert_eq!(
        ds.header.names().collect::<Vec<_>>(),
        vec!["100000000000000000000", "b"]
    );

    let _ = std::fs::remove_file(&path);
}
