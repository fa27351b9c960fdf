use crate::dashboard::DashboardView;
use crate::models::{Notice, NoticeLevel};
use crate::utils::html::{escape_html, escape_script_json};
use serde::Serialize;
use tracing::warn;

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="id">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{title}</title>
  <link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css" crossorigin="" />
  <link rel="stylesheet" href="https://unpkg.com/leaflet.markercluster@1.5.3/dist/MarkerCluster.css" />
  <link rel="stylesheet" href="https://unpkg.com/leaflet.markercluster@1.5.3/dist/MarkerCluster.Default.css" />
  <link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/Leaflet.awesome-markers/2.0.2/leaflet.awesome-markers.css" />
  <link rel="stylesheet" href="https://netdna.bootstrapcdn.com/bootstrap/3.0.0/css/bootstrap-glyphicons.css" />
  <style>
    body { font-family: "Source Sans Pro", sans-serif; margin: 0 auto; padding: 24px 48px; color: #31333f; }
    h1 { font-size: 2rem; margin-bottom: 16px; }
    form { display: grid; grid-template-columns: 1fr 1fr; gap: 12px 24px; margin-bottom: 16px; }
    form .wide { grid-column: 1 / span 2; }
    label { display: block; font-size: 0.9rem; margin-bottom: 4px; }
    select { width: 100%; padding: 6px; border-radius: 6px; border: 1px solid #d0d3da; }
    .notice { padding: 12px 16px; border-radius: 6px; margin: 8px 0; }
    .notice-error { background: #ffe0e0; color: #7d1a1a; }
    .notice-warning { background: #fff6d6; color: #6b5200; }
    .notice-info { background: #e0efff; color: #0b4a8b; }
    .notice-success { background: #ddf5e3; color: #175c2c; }
    #map { border: 1px solid #d0d3da; margin: 16px 0; }
    .download { display: inline-block; padding: 8px 14px; border-radius: 6px; border: 1px solid #d0d3da; color: inherit; text-decoration: none; }
    .download:hover { border-color: #ff4b4b; color: #ff4b4b; }
  </style>
</head>
<body>
"#;

const PAGE_SCRIPTS: &str = r#"
  <script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js" crossorigin=""></script>
  <script src="https://unpkg.com/leaflet.markercluster@1.5.3/dist/leaflet.markercluster.js"></script>
  <script src="https://cdnjs.cloudflare.com/ajax/libs/Leaflet.awesome-markers/2.0.2/leaflet.awesome-markers.js"></script>
  <script>
    (function () {
      const mapView = JSON.parse(document.getElementById('map-data').textContent);
      const map = L.map('map').setView(mapView.center, mapView.zoom);
      const overlays = {};

      L.tileLayer(mapView.tiles.url, {
        attribution: mapView.tiles.attribution,
        subdomains: 'abcd',
        maxZoom: 20
      }).addTo(map);

      if (mapView.overlay) {
        const style = mapView.overlay.style;
        const layer = L.geoJSON(mapView.overlay.layer.data, {
          style: function () { return style; }
        }).addTo(map);
        overlays[mapView.overlay.name] = layer;
      }

      if (mapView.cluster) {
        const cluster = L.markerClusterGroup();
        const icon = L.AwesomeMarkers.icon({
          icon: mapView.cluster.icon.icon,
          markerColor: mapView.cluster.icon.color,
          prefix: 'glyphicon'
        });
        mapView.cluster.markers.forEach(function (m) {
          L.marker([m.latitude, m.longitude], { icon: icon })
            .bindPopup(m.popup)
            .addTo(cluster);
        });
        cluster.addTo(map);
        overlays[mapView.cluster.name] = cluster;
      }

      if (mapView.layer_control) {
        L.control.layers({}, overlays).addTo(map);
      }
    })();
  </script>
</body>
</html>
"#;

fn notice_class(level: NoticeLevel) -> &'static str {
    match level {
        NoticeLevel::Error => "notice notice-error",
        NoticeLevel::Warning => "notice notice-warning",
        NoticeLevel::Info => "notice notice-info",
        NoticeLevel::Success => "notice notice-success",
    }
}

fn notice_icon(level: NoticeLevel) -> &'static str {
    match level {
        NoticeLevel::Error => "\u{26a0}\u{fe0f}",
        NoticeLevel::Warning => "\u{2757}",
        NoticeLevel::Info => "\u{1f4cc}",
        NoticeLevel::Success => "\u{2705}",
    }
}

fn push_notice(html: &mut String, notice: &Notice) {
    html.push_str(&format!(
        "  <div class=\"{}\">{} {}</div>\n",
        notice_class(notice.level),
        notice_icon(notice.level),
        escape_html(&notice.message)
    ));
}

fn push_select(html: &mut String, name: &str, label: &str, options: &[&str], selected: &str) {
    let class = if name == "province" { r#" class="wide""# } else { "" };
    html.push_str(&format!(
        "    <div{class}><label for=\"{name}\">{}</label>\n",
        escape_html(label)
    ));
    html.push_str(&format!(
        "      <select id=\"{name}\" name=\"{name}\" onchange=\"this.form.submit()\">\n"
    ));
    for option in options {
        let marker = if *option == selected { " selected" } else { "" };
        html.push_str(&format!(
            "        <option value=\"{0}\"{marker}>{0}</option>\n",
            escape_html(option)
        ));
    }
    html.push_str("      </select></div>\n");
}

/// Serialize `value` for a `<script type="application/json">` block. A failure
/// becomes an error notice and the client receives `null`.
fn embed_json<T: Serialize>(value: &T) -> std::result::Result<String, Notice> {
    match serde_json::to_string(value) {
        Ok(json) => Ok(escape_script_json(&json)),
        Err(err) => {
            warn!(error = %err, "Failed to serialize map view");
            Err(Notice::error(format!("Gagal menampilkan peta: {}", err)))
        }
    }
}

/// Render the full dashboard page. `download_href` is where the static
/// image download link points.
pub fn render_page(view: &DashboardView, download_href: &str) -> String {
    let mut html = PAGE_HEAD.replace("{title}", &escape_html(view.title));

    html.push_str(&format!(
        "  <h1>\u{1f5fa}\u{fe0f} {}</h1>\n",
        escape_html(view.title)
    ));

    html.push_str("  <form method=\"get\" action=\"\">\n");
    push_select(
        &mut html,
        "instrument",
        "\u{1f50d} Pilih Jenis Alat:",
        &view.instrument_options,
        view.selection.instrument.code(),
    );
    push_select(
        &mut html,
        "basemap",
        "\u{1f5fa}\u{fe0f} Pilih Basemap:",
        &view.basemap_options,
        view.selection.basemap.code(),
    );
    let provinces: Vec<&str> = view.province_options.iter().map(String::as_str).collect();
    push_select(
        &mut html,
        "province",
        "\u{1f5c2}\u{fe0f} Pilih Provinsi (Opsional):",
        &provinces,
        view.selection.province.label(),
    );
    html.push_str("  </form>\n");

    let map_json = embed_json(&view.map);

    for notice in &view.notices {
        push_notice(&mut html, notice);
    }
    if let Err(notice) = &map_json {
        push_notice(&mut html, notice);
    }

    html.push_str(&format!(
        "  <div id=\"map\" style=\"width: {}px; height: {}px;\"></div>\n",
        view.map.width, view.map.height
    ));
    html.push_str(&format!(
        "  <script type=\"application/json\" id=\"map-data\">{}</script>\n",
        map_json.as_deref().unwrap_or("null")
    ));

    html.push_str("  <h2>\u{1f4e5} Download Peta Statis</h2>\n");
    html.push_str(&format!("  <p>{}</p>\n", escape_html(&view.asset.prompt())));
    match &view.asset_notice {
        Some(notice) => push_notice(&mut html, notice),
        None => html.push_str(&format!(
            "  <a class=\"download\" href=\"{}\" download=\"{}\">&#11015;&#65039; {}</a>\n",
            escape_html(download_href),
            escape_html(&view.asset.file_name),
            escape_html(&view.asset.button_label())
        )),
    }

    html.push_str(PAGE_SCRIPTS);
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::Dashboard;
    use crate::models::SelectionQuery;
    use crate::settings::Settings;
    use tempfile::TempDir;

    fn render(root: &std::path::Path, query: SelectionQuery) -> String {
        let settings = Settings::default().with_root(root);
        let view = Dashboard::from_settings(&settings).render(&query);
        render_page(&view, "/download?instrument=AWS&basemap=ZOM")
    }

    #[test]
    fn test_page_contains_selectors_and_map() {
        let temp_dir = TempDir::new().unwrap();
        let html = render(temp_dir.path(), SelectionQuery::default());

        assert!(html.contains(r#"<select id="instrument" name="instrument""#));
        assert!(html.contains(r#"<option value="AAWS" selected>AAWS</option>"#));
        assert!(html.contains(r#"<option value="Provinsi">Provinsi</option>"#));
        assert!(html.contains(r#"<option value="Semua" selected>Semua</option>"#));
        assert!(html.contains(r#"style="width: 1200px; height: 700px;""#));
        assert!(html.contains("Gagal memuat data CSV"));
        assert!(html.contains("Peta statis untuk AAWS dengan ZOM belum tersedia."));
        assert!(!html.contains(r#"class="download""#));
    }

    #[test]
    fn test_page_offers_download_and_escapes_popups() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::create_dir_all(temp_dir.path().join("data")).unwrap();
        std::fs::create_dir_all(temp_dir.path().join("image")).unwrap();
        std::fs::write(
            temp_dir.path().join("data/aws.csv"),
            "latt_station;long_station;name_station\n-6.2;106.8;</script><b>\n",
        )
        .unwrap();
        std::fs::write(temp_dir.path().join("image/shp_AWS.png"), b"png").unwrap();

        let html = render(
            temp_dir.path(),
            SelectionQuery {
                instrument: Some("AWS".to_string()),
                basemap: Some("Provinsi".to_string()),
                province: None,
            },
        );

        assert!(html.contains(r#"download="shp_AWS.png""#));
        assert!(html.contains("Download Peta AWS"));
        assert!(!html.contains("</script><b>"));
        assert_eq!(html.matches("</script>").count(), 5);
    }

    #[test]
    fn test_unserializable_map_data_becomes_error_notice() {
        let mut keyed = std::collections::HashMap::new();
        keyed.insert((1, 2), "zone");

        let notice = embed_json(&keyed).unwrap_err();
        assert_eq!(notice.level, NoticeLevel::Error);
        assert!(notice.message.starts_with("Gagal menampilkan peta:"));

        assert_eq!(embed_json(&"</script>").unwrap(), "\"\\u003c/script>\"");
    }
}
