//! Server-rendered HTML pages
//!
//! Every page is a `format!` template over the shared layout. Record fields
//! are escaped before interpolation; everything else in the templates is
//! static markup. The class names and element ids are part of the UI
//! contract the browser test suite drives against.

use gestor_common::{genre_name, Genre, Series};

/// Embedded stylesheet served at `/assets/styles.css`.
pub const STYLES: &str = r#"* { box-sizing: border-box; }
body { font-family: ui-sans-serif, system-ui, -apple-system, Segoe UI, Roboto, Helvetica, Arial; margin: 0; background: #f8f9fa; color: #212529; }
.navbar { background: #212529; padding: 12px 24px; display: flex; gap: 18px; align-items: center; }
.navbar a { color: #f8f9fa; text-decoration: none; font-weight: 500; }
.navbar a:hover { color: #adb5bd; }
.navbar .brand { font-size: 1.2rem; font-weight: 700; margin-right: 12px; }
.container { max-width: 960px; margin: 0 auto; padding: 24px 16px; }
h1 { font-size: 1.6rem; }
.btn { display: inline-block; padding: 8px 14px; border-radius: 6px; border: 1px solid transparent; cursor: pointer; text-decoration: none; font-size: 0.95rem; background: #e9ecef; color: #212529; }
.btn-success { background: #198754; border-color: #198754; color: #fff; }
.btn-danger { background: #dc3545; border-color: #dc3545; color: #fff; }
.btn-secondary { background: #6c757d; border-color: #6c757d; color: #fff; }
.btn-primary { background: #0d6efd; border-color: #0d6efd; color: #fff; }
.btn-outline-warning { background: #fff; border-color: #ffc107; color: #997404; }
.btn-outline-danger { background: #fff; border-color: #dc3545; color: #dc3545; }
.btn-outline-success { background: #fff; border-color: #198754; color: #198754; }
.form-control, .form-select { display: block; width: 100%; padding: 8px 10px; border: 1px solid #ced4da; border-radius: 6px; margin: 4px 0 14px; font-size: 0.95rem; }
label { font-weight: 500; }
.table { width: 100%; border-collapse: collapse; margin-top: 14px; background: #fff; }
.table th, .table td { border: 1px solid #dee2e6; padding: 10px 12px; text-align: left; }
.table thead th { background: #e9ecef; }
.cards { display: grid; grid-template-columns: repeat(auto-fill, minmax(220px, 1fr)); gap: 16px; margin-top: 16px; }
.card { background: #fff; border: 1px solid #dee2e6; border-radius: 8px; overflow: hidden; }
.card-img-top { width: 100%; height: 160px; object-fit: cover; background: #e9ecef; }
.card-body { padding: 12px 14px; }
.card-title { margin: 0 0 6px; font-size: 1.05rem; }
.card-text { margin: 0 0 10px; color: #6c757d; }
.alert { padding: 12px 16px; border-radius: 6px; margin: 14px 0; }
.alert-info { background: #cff4fc; color: #055160; }
.alert-danger { background: #f8d7da; color: #842029; }
.modal { display: none; position: fixed; inset: 0; background: rgba(0, 0, 0, 0.5); z-index: 10; }
.modal.show { display: block; }
.modal-dialog { max-width: 480px; margin: 10vh auto; }
.modal-content { background: #fff; border-radius: 8px; overflow: hidden; }
.modal-header, .modal-footer { padding: 12px 16px; display: flex; align-items: center; }
.modal-header { border-bottom: 1px solid #dee2e6; justify-content: space-between; }
.modal-footer { border-top: 1px solid #dee2e6; justify-content: flex-end; gap: 8px; }
.modal-body { padding: 16px; }
.modal-title { margin: 0; font-size: 1.1rem; }
.filter-form { display: flex; gap: 10px; align-items: flex-end; background: #fff; border: 1px solid #dee2e6; border-radius: 8px; padding: 14px 16px; }
.filter-form .form-control, .filter-form .form-select { margin: 0; }
"#;

// Open and close buttons carry the same data attributes the markup has
// always used, so the stylesheet plus this listener stand in for the
// original widget library.
const MODAL_SCRIPT: &str = r#"document.addEventListener('click', function (event) {
  var trigger = event.target.closest('[data-bs-target]');
  if (trigger) {
    var modal = document.querySelector(trigger.getAttribute('data-bs-target'));
    if (modal) { modal.classList.add('show'); }
    return;
  }
  var dismiss = event.target.closest('[data-bs-dismiss="modal"]');
  if (dismiss) {
    var open = dismiss.closest('.modal');
    if (open) { open.classList.remove('show'); }
  }
});"#;

/// Escape text for interpolation into HTML body or attribute positions.
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!doctype html>
<html lang="es">
  <head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title}</title>
    <link rel="stylesheet" href="/assets/styles.css">
  </head>
  <body>
    <nav class="navbar">
      <span class="brand">Gestor de Cine</span>
      <a href="/">Home</a>
      <a href="/series/index">Series</a>
      <a href="/genre/index">Géneros</a>
    </nav>
    <main class="container">
{body}
    </main>
    <script>{script}</script>
  </body>
</html>"#,
        title = escape(title),
        body = body,
        script = MODAL_SCRIPT,
    )
}

fn genre_options(genres: &[Genre], selected: u32) -> String {
    genres
        .iter()
        .map(|g| {
            format!(
                r#"<option value="{id}"{sel}>{name}</option>"#,
                id = g.id,
                sel = if g.id == selected { " selected" } else { "" },
                name = escape(&g.name),
            )
        })
        .collect()
}

/// Home page: filter form plus the filtered series cards.
pub fn home(
    series: &[Series],
    genres: &[Genre],
    selected_name: &str,
    selected_genre: u32,
) -> String {
    let filter = format!(
        r#"<form class="filter-form" action="/home/filter" method="post">
  <input type="text" class="form-control" name="Name" placeholder="Buscar por nombre" value="{name}">
  <select class="form-select" name="GenreId">
    <option value="">Todos los géneros</option>
    {options}
  </select>
  <button type="submit" class="btn btn-outline-success">Filtrar</button>
</form>"#,
        name = escape(selected_name),
        options = genre_options(genres, selected_genre),
    );

    let listing = if series.is_empty() {
        r#"<div class="alert alert-info">No hay ninguna serie registrada</div>"#.to_string()
    } else {
        let cards: String = series.iter().map(|s| home_card(s, genres)).collect();
        format!(r#"<div class="cards">{cards}</div>"#)
    };

    layout("Home", &format!("<h1>Home</h1>\n{filter}\n{listing}"))
}

fn home_card(serie: &Series, genres: &[Genre]) -> String {
    let name = escape(&serie.name);
    let genre = escape(genre_name(genres, serie.genre_id));
    format!(
        r##"<div class="card">
  <img src="{front_page}" class="card-img-top" alt="{name}">
  <div class="card-body">
    <h5 class="card-title">{name}</h5>
    <p class="card-text">{genre}</p>
    <button type="button" class="btn btn-primary" data-bs-target="#detailsModal-{id}">Detalles</button>
  </div>
</div>
<div class="modal" id="detailsModal-{id}" tabindex="-1">
  <div class="modal-dialog">
    <div class="modal-content">
      <div class="modal-header"><h5 class="modal-title">{name}</h5></div>
      <div class="modal-body">
        <p>Género: {genre}</p>
        <a href="{youtube}" target="_blank" rel="noopener">Ver tráiler</a>
      </div>
      <div class="modal-footer">
        <button type="button" class="btn btn-success" data-bs-dismiss="modal">Cerrar</button>
      </div>
    </div>
  </div>
</div>"##,
        id = serie.id,
        front_page = escape(&serie.front_page),
        youtube = escape(&serie.youtube_link),
    )
}

/// Genre listing with per-row edit links and delete confirmation modals.
pub fn genre_index(genres: &[Genre]) -> String {
    let rows = if genres.is_empty() {
        r#"<tr><td colspan="2">No hay géneros cinematográficos registrados</td></tr>"#.to_string()
    } else {
        genres
            .iter()
            .map(|g| {
                format!(
                    r##"<tr>
  <td>{name}</td>
  <td>
    <a class="btn btn-outline-warning" href="/genre/edit/{id}">Editar</a>
    <button type="button" class="btn btn-outline-danger" data-bs-target="#confirmationModal-{id}">Eliminar</button>
  </td>
</tr>"##,
                    id = g.id,
                    name = escape(&g.name),
                )
            })
            .collect()
    };

    let modals: String = genres
        .iter()
        .map(|g| {
            delete_modal(
                g.id,
                &format!("¿Seguro que desea eliminar el género {}?", escape(&g.name)),
                "/genre/delete",
                "GenreId",
            )
        })
        .collect();

    let body = format!(
        r#"<h1>Géneros cinematográficos</h1>
<a class="btn btn-success" href="/genre/create">Crear nuevo género</a>
<table class="table">
  <thead><tr><th>Nombre</th><th>Acciones</th></tr></thead>
  <tbody>
{rows}
  </tbody>
</table>
{modals}"#
    );
    layout("Géneros cinematográficos", &body)
}

fn delete_modal(id: u32, message: &str, action: &str, field: &str) -> String {
    format!(
        r#"<div class="modal" id="confirmationModal-{id}" tabindex="-1">
  <div class="modal-dialog">
    <div class="modal-content">
      <div class="modal-header"><h5 class="modal-title">Confirmar eliminación</h5></div>
      <div class="modal-body">{message}</div>
      <div class="modal-footer">
        <button type="button" class="btn btn-secondary" data-bs-dismiss="modal">Cancelar</button>
        <form action="{action}" method="post">
          <input type="hidden" name="{field}" value="{id}">
          <button type="submit" class="btn btn-danger">Eliminar</button>
        </form>
      </div>
    </div>
  </div>
</div>"#
    )
}

/// Genre create/edit form. A present record switches the form into edit
/// mode: the id travels in a hidden field and the action changes.
pub fn genre_form(genre: Option<&Genre>) -> String {
    let (title, action, hidden, value) = match genre {
        Some(g) => (
            "Editar género cinematográfico",
            "/genre/edit",
            format!(
                r#"<input type="hidden" name="genreId" value="{}">"#,
                g.id
            ),
            escape(&g.name),
        ),
        None => (
            "Crear género cinematográfico",
            "/genre/create",
            String::new(),
            String::new(),
        ),
    };

    let body = format!(
        r#"<h1>{title}</h1>
<form action="{action}" method="post">
  {hidden}
  <label for="genreName">Nombre</label>
  <input type="text" class="form-control" id="genreName" name="Name" value="{value}" required>
  <button type="submit" class="btn btn-success">Guardar</button>
  <a class="btn btn-danger" href="/genre/index">Cancelar</a>
</form>"#
    );
    layout(title, &body)
}

/// Series listing: cards with edit links and delete confirmation modals.
pub fn series_index(series: &[Series], genres: &[Genre]) -> String {
    let alert = if genres.is_empty() {
        r#"<div class="alert alert-danger">No hay géneros registrados. Cree un género antes de añadir series.</div>"#
    } else {
        ""
    };

    let listing = if series.is_empty() {
        r#"<div class="alert alert-info">No hay ninguna serie registrada</div>"#.to_string()
    } else {
        let cards: String = series.iter().map(|s| series_card(s, genres)).collect();
        format!(r#"<div class="cards">{cards}</div>"#)
    };

    let modals: String = series
        .iter()
        .map(|s| {
            delete_modal(
                s.id,
                &format!("¿Seguro que desea eliminar la serie {}?", escape(&s.name)),
                "/series/delete",
                "serieId",
            )
        })
        .collect();

    let body = format!(
        r#"<h1>Series</h1>
<a class="btn btn-success" href="/series/create">Crear nueva serie</a>
{alert}
{listing}
{modals}"#
    );
    layout("Series", &body)
}

fn series_card(serie: &Series, genres: &[Genre]) -> String {
    format!(
        r##"<div class="card">
  <img src="{front_page}" class="card-img-top" alt="{name}">
  <div class="card-body">
    <h5 class="card-title">{name}</h5>
    <p class="card-text">{genre}</p>
    <a class="btn btn-outline-warning" href="/series/edit/{id}">Editar</a>
    <button type="button" class="btn btn-outline-danger" data-bs-target="#confirmationModal-{id}">Eliminar</button>
  </div>
</div>"##,
        id = serie.id,
        name = escape(&serie.name),
        genre = escape(genre_name(genres, serie.genre_id)),
        front_page = escape(&serie.front_page),
    )
}

/// Series create/edit form with the genre dropdown.
pub fn series_form(serie: Option<&Series>, genres: &[Genre]) -> String {
    let (title, action, hidden) = match serie {
        Some(s) => (
            "Editar serie",
            "/series/edit",
            format!(r#"<input type="hidden" name="serieId" value="{}">"#, s.id),
        ),
        None => ("Crear serie", "/series/create", String::new()),
    };
    let (name, front_page, youtube_link, genre_id) = match serie {
        Some(s) => (
            escape(&s.name),
            escape(&s.front_page),
            escape(&s.youtube_link),
            s.genre_id,
        ),
        None => (String::new(), String::new(), String::new(), 0),
    };

    let body = format!(
        r#"<h1>{title}</h1>
<form action="{action}" method="post">
  {hidden}
  <label for="serieName">Nombre</label>
  <input type="text" class="form-control" id="serieName" name="Name" value="{name}" required>
  <label for="serieFrontPage">Imagen de portada</label>
  <input type="url" class="form-control" id="serieFrontPage" name="FrontPage" value="{front_page}" required>
  <label for="serieYoutubeLink">Enlace de YouTube</label>
  <input type="url" class="form-control" id="serieYoutubeLink" name="YoutubeLink" value="{youtube_link}" required>
  <label for="serieGenreId">Género</label>
  <select class="form-select" id="serieGenreId" name="GenreId" required>
    {options}
  </select>
  <button type="submit" class="btn btn-success">Guardar</button>
  <a class="btn btn-danger" href="/series/index">Cancelar</a>
</form>"#,
        options = genre_options(genres, genre_id),
    );
    layout(title, &body)
}

/// Fallback page for unknown routes.
pub fn not_found() -> String {
    layout(
        "Error 404",
        r#"<h1>Error 404</h1>
<p>La página solicitada no existe.</p>
<a class="btn btn-success" href="/">Volver al inicio</a>"#,
    )
}
