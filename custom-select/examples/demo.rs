use std::fs::File;

use custom_select::{CustomSelect, Options};
use formdom::{Document, Element, EventKind, Rect};
use simplelog::{Config, LevelFilter, WriteLogger};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Set up file logging
    let log_file = File::create("custom_select.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let mut doc = Document::new();
    doc.set_viewport(800, 600);
    let body = doc.body();
    let form = doc.insert(body, Element::form().id("order"));
    let fruit = doc.insert(
        form,
        Element::select()
            .attr("name", "fruit")
            .data("placeholder", "Pick a fruit")
            .child(
                Element::optgroup("Citrus")
                    .child(Element::option("Orange").value("orange"))
                    .child(Element::option("Lemon").value("lemon")),
            )
            .child(Element::option("Apple").value("apple"))
            .child(Element::option("Durian").value("durian").disabled(true)),
    );
    let size = doc.insert(
        form,
        Element::select()
            .attr("name", "size")
            .child(Element::option("Small"))
            .child(Element::option("Medium").selected(true))
            .child(Element::option("Large")),
    );

    doc.on(fruit, EventKind::Change, |doc, event| {
        println!("change: fruit = {}", doc.value(event.target));
    });

    let options = Options::new()
        .custom_class("demo")
        .on_change(|change| println!("on_change: #{} {:?}", change.index, change.label));
    let selects = CustomSelect::new(&mut doc, "#order select", options)?;

    let Some(fruit_widget) = selects.widget(fruit) else {
        return Ok(());
    };
    let Some(size_widget) = selects.widget(size) else {
        return Ok(());
    };
    doc.set_rect(fruit_widget.root(), Rect::new(20, 500, 200, 30));
    doc.set_rect(fruit_widget.list(), Rect::new(20, 530, 200, 120));
    doc.set_rect(size_widget.root(), Rect::new(20, 40, 200, 30));

    println!("initial:\n{}\n", doc.outer_html(form));

    // Open the fruit list; it sits near the bottom so it opens above.
    doc.click(fruit_widget.root());
    doc.run_timers();
    println!("fruit open: {}", selects.is_open(fruit));

    // Opening the size list closes the fruit list as an outside click.
    doc.click(size_widget.root());
    println!(
        "after clicking size: fruit open = {}, size open = {}",
        selects.is_open(fruit),
        selects.is_open(size)
    );
    doc.click_at(700, 300);

    doc.click(fruit_widget.root());
    let apple = doc
        .children(fruit_widget.list())
        .get(1)
        .copied()
        .unwrap_or(fruit_widget.list());
    doc.click(apple);

    println!("\nafter picking apple:\n{}\n", doc.outer_html(form));

    selects.update(&mut doc);
    selects.destroy(&mut doc, None);
    println!("host listeners left after destroy: {}", doc.total_listeners());

    Ok(())
}
