use std::fs;

use anyhow::Result;
use ytu_takvim_core::prelude::*;

/// Which entries a command should operate on.
pub struct SelectionSpec {
    pub all: bool,
    pub popular: bool,
    pub ids: Vec<String>,
}

/// Fetch the payload and normalize its entries.
async fn load_calendar(api_url: &str) -> Result<(CalendarPayload, Vec<Entry>)> {
    tracing::info!("Loading calendar from {}", api_url);
    let provider = TakvimProvider::new(api_url);
    let payload = provider.fetch_payload().await?;
    let entries = normalize_entries(&payload.entries, &EVENT_PALETTE);
    Ok((payload, entries))
}

/// Resolve a selection spec against the normalized entries. Unknown ids are
/// an error rather than a silent no-op.
fn build_selection(spec: &SelectionSpec, entries: &[Entry]) -> Result<Selection> {
    let mut selection = Selection::new();

    if spec.all {
        selection.select_all(entries);
    }
    if spec.popular {
        selection.apply_popular(&PopularPreset::default(), entries);
    }
    for id in &spec.ids {
        if entries.iter().any(|entry| entry.id == *id) {
            selection.insert(id.clone());
        } else {
            anyhow::bail!("Bilinmeyen girdi id'si: {}", id);
        }
    }

    Ok(selection)
}

/// List entries grouped by academic period.
pub async fn list_command(api_url: String, json: bool) -> Result<()> {
    let (payload, entries) = load_calendar(&api_url).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    if let Some(file_name) = payload.source.as_ref().and_then(|s| s.file_name.as_deref()) {
        println!("Kaynak: {}", file_name);
    }
    println!("{} girdi bulundu", entries.len());

    for (group, items) in group_by_period(&entries) {
        println!("\n{}", group);
        for entry in items {
            let tarih = format_date_info(&entry.tarih);
            println!(
                "  [{}] {}",
                entry.id,
                entry.category().unwrap_or("Kategori bilgisi yok")
            );
            let tarih_line = if tarih.is_empty() {
                "Tarih bilgisi yok"
            } else {
                tarih.as_str()
            };
            println!("      {}", tarih_line);
        }
    }

    Ok(())
}

/// Preview the selection month by month.
pub async fn months_command(api_url: String, spec: SelectionSpec) -> Result<()> {
    let (_, entries) = load_calendar(&api_url).await?;
    let selection = build_selection(&spec, &entries)?;

    if selection.is_empty() {
        println!("Henüz seçim yapılmadı; --all, --popular veya --ids kullanın.");
        return Ok(());
    }

    let buckets = bucket_by_month(&selection, &entries);
    for bucket in &buckets {
        println!("\n{} ({} etkinlik)", bucket.month.label(), bucket.events.len());
        for event in &bucket.events {
            // events carry exclusive ends; show the inclusive range
            let last_day = event.end.pred_opt().unwrap_or(event.end);
            let span = DateSpan::new(event.start, last_day);
            println!("  {}: {}", format_span(&span), event.title);
        }
    }

    Ok(())
}

/// Export the selection as an ICS file.
pub async fn export_command(
    api_url: String,
    spec: SelectionSpec,
    output: Option<String>,
) -> Result<()> {
    let (_, entries) = load_calendar(&api_url).await?;
    let selection = build_selection(&spec, &entries)?;

    let selected: Vec<Entry> = selected_entries(&selection, &entries)
        .into_iter()
        .cloned()
        .collect();
    if selected.is_empty() {
        // exporting nothing is a no-op, not an error
        println!("Seçim boş, ICS dosyası oluşturulmadı.");
        return Ok(());
    }

    let generator = IcsGenerator::default();
    let ics_content = generator.generate(&selected);

    let output_file = output.unwrap_or_else(|| ICS_FILE_NAME.to_string());
    fs::write(&output_file, ics_content)?;

    let event_count: usize = selected.iter().map(|entry| entry.tarih.spans.len()).sum();
    println!("✓ {} girdi, {} etkinlik dışa aktarıldı", selected.len(), event_count);
    println!("✓ ICS dosyası kaydedildi: {}", output_file);

    Ok(())
}
