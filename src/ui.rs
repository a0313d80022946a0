use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
    Frame,
};

use crate::app::{App, AppMode};
use crate::product::Product;

pub fn draw(frame: &mut Frame, app: &App) {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(3),
        ])
        .split(frame.area());

    draw_filter(frame, main_chunks[0], app);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(main_chunks[1]);

    draw_product_table(frame, content_chunks[0], app);
    draw_product_details(frame, content_chunks[1], app);
    draw_status_bar(frame, main_chunks[2], app);
}

fn draw_filter(frame: &mut Frame, area: Rect, app: &App) {
    let style = if app.mode == AppMode::Filter {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let title = if app.mode == AppMode::Filter {
        format!(" {} - Filter by (Esc to clear) ", app.page_title)
    } else {
        format!(" {} - Press '/' to filter ", app.page_title)
    };

    let input = Paragraph::new(app.filter.as_str()).style(style).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(style),
    );

    frame.render_widget(input, area);

    if app.mode == AppMode::Filter {
        let offset = app.filter.chars().count() as u16;
        frame.set_cursor_position((area.x + offset + 1, area.y + 1));
    }
}

fn draw_product_table(frame: &mut Frame, area: Rect, app: &App) {
    let products = app.filtered_products();

    let mut header = vec!["Product", "Code", "Available", "Price", "Rating"];
    let mut widths = vec![
        Constraint::Min(16),
        Constraint::Length(10),
        Constraint::Length(16),
        Constraint::Length(9),
        Constraint::Length(7),
    ];
    if app.show_image {
        header.insert(0, "Image");
        widths.insert(0, Constraint::Min(18));
    }

    let rows: Vec<Row> = products
        .iter()
        .enumerate()
        .map(|(i, product)| {
            let mut cells = vec![
                Cell::from(product.product_name.clone()),
                Cell::from(product.product_code.clone()),
                Cell::from(product.release_date.clone()),
                Cell::from(product.display_price()),
                Cell::from(Span::styled(product.stars(), Style::default().fg(Color::Yellow))),
            ];
            if app.show_image {
                cells.insert(
                    0,
                    Cell::from(Span::styled(
                        product.image_url.clone(),
                        Style::default().fg(Color::Cyan),
                    )),
                );
            }

            let style = if Some(i) == app.selected_index {
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            Row::new(cells).style(style)
        })
        .collect();

    let title = if app.filter.is_empty() {
        " Products ".to_string()
    } else {
        format!(" Products ({} of {}) ", products.len(), app.products.len())
    };

    let table = Table::new(rows, widths)
        .header(
            Row::new(header).style(
                Style::default()
                    .add_modifier(Modifier::BOLD)
                    .add_modifier(Modifier::UNDERLINED),
            ),
        )
        .block(Block::default().borders(Borders::ALL).title(title));

    frame.render_widget(table, area);
}

fn draw_product_details(frame: &mut Frame, area: Rect, app: &App) {
    let content = match app.selected_product() {
        Some(p) => format_product_details(p, app.show_image),
        None => format_empty_state(app),
    };

    let details = Paragraph::new(content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Product Detail "),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(details, area);
}

fn format_product_details(product: &Product, show_image: bool) -> Vec<Line<'static>> {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let mut lines = vec![Line::from("")];

    lines.push(Line::from(vec![
        Span::styled("Name:     ", bold),
        Span::raw(product.product_name.clone()),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Code:     ", bold),
        Span::raw(product.product_code.clone()),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Released: ", bold),
        Span::raw(product.release_date.clone()),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Price:    ", bold),
        Span::raw(product.display_price()),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Rating:   ", bold),
        Span::styled(product.stars(), Style::default().fg(Color::Yellow)),
        Span::styled(
            format!(" ({:.1})", product.star_rating),
            Style::default().fg(Color::DarkGray),
        ),
    ]));

    if !product.description.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(product.description.clone()));
    }

    if show_image && !product.image_url.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Image:    ", bold),
            Span::styled(product.image_url.clone(), Style::default().fg(Color::Cyan)),
        ]));
    }

    lines
}

fn format_empty_state(app: &App) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from("")];

    let message = if app.loading {
        "Loading products..."
    } else if app.products.is_empty() {
        "No products loaded"
    } else {
        "No product matches the filter"
    };
    lines.push(Line::from(Span::styled(
        message,
        Style::default().fg(Color::DarkGray),
    )));

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Controls:",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from("  /     - Filter by name"));
    lines.push(Line::from("  j/k   - Navigate products"));
    lines.push(Line::from("  i     - Show/hide images"));
    lines.push(Line::from("  r     - Reload"));
    lines.push(Line::from("  q     - Quit"));

    lines
}

fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let status = if let Some(err) = &app.last_error {
        Line::from(Span::styled(
            format!("Error: {}", err),
            Style::default().fg(Color::Red),
        ))
    } else if app.loading {
        Line::from(Span::styled(
            "Loading...",
            Style::default().fg(Color::Yellow),
        ))
    } else if let Some(msg) = &app.status_message {
        Line::from(Span::styled(msg.clone(), Style::default().fg(Color::Cyan)))
    } else {
        let loaded_info = app
            .last_loaded
            .map(|at| format!(" | Loaded at {}", at.format("%H:%M:%S")))
            .unwrap_or_default();
        let image_hint = if app.show_image { " hide image  " } else { " show image  " };

        Line::from(vec![
            Span::raw(format!("{} product(s){}", app.products.len(), loaded_info)),
            Span::raw(" | "),
            Span::styled("q", Style::default().fg(Color::Yellow)),
            Span::raw(" quit  "),
            Span::styled("/", Style::default().fg(Color::Yellow)),
            Span::raw(" filter  "),
            Span::styled("i", Style::default().fg(Color::Yellow)),
            Span::raw(image_hint),
            Span::styled("r", Style::default().fg(Color::Yellow)),
            Span::raw(" reload"),
        ])
    };

    let status_bar = Paragraph::new(status).block(Block::default().borders(Borders::ALL));

    frame.render_widget(status_bar, area);
}
