//! Numbered-menu console that drives the inventory system.
//!
//! Input is read line by line from any async reader; background alerts are
//! printed while the console waits for input. Malformed input is reported and
//! never ends the loop. End of input behaves like "Save & Exit".

mod menu;

pub use menu::*;

use std::io::{self, Write};

use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tokio::sync::mpsc;
use tracing::{debug, error, instrument, warn};

use crate::app_system::InventorySystem;
use crate::domain::ProductRecord;
use crate::error::InventoryError;
use crate::messages::RestockOutcome;
use crate::monitor::LowStockAlert;

const TABLE_RULE: &str = "-------------------------------------------------------------";

enum ConsoleEvent {
    Line(io::Result<Option<String>>),
    Alert(Option<LowStockAlert>),
}

pub struct Console<R, W> {
    lines: Lines<R>,
    out: W,
    alerts: Option<mpsc::Receiver<LowStockAlert>>,
    low_stock_threshold: u32,
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(
        input: R,
        out: W,
        alerts: mpsc::Receiver<LowStockAlert>,
        low_stock_threshold: u32,
    ) -> Self {
        Self {
            lines: input.lines(),
            out,
            alerts: Some(alerts),
            low_stock_threshold,
        }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.out
    }

    /// Run until the user saves and exits or input ends.
    ///
    /// A console I/O failure still saves the inventory before the error is
    /// returned, so the session's changes survive a closed terminal.
    #[instrument(name = "console", skip_all)]
    pub async fn run(&mut self, system: &InventorySystem) -> io::Result<()> {
        let result = self.menu_loop(system).await;
        if let Err(e) = &result {
            warn!(error = %e, "Console I/O failed, saving inventory");
            if let Err(save_err) = system.save_inventory().await {
                error!(error = %save_err, "Inventory not saved after console failure");
            }
        }
        result
    }

    async fn menu_loop(&mut self, system: &InventorySystem) -> io::Result<()> {
        loop {
            writeln!(self.out, "{}", MENU)?;
            let Some(line) = self.prompt("Enter your choice: ").await? else {
                writeln!(self.out)?;
                return self.save_and_exit(system).await;
            };

            match MenuInput::parse(&line) {
                MenuInput::Choice(MenuChoice::SaveAndExit) => {
                    return self.save_and_exit(system).await;
                }
                MenuInput::Choice(choice) => {
                    debug!(?choice, "Menu choice");
                    self.dispatch(choice, system).await?;
                }
                MenuInput::OutOfRange(_) => writeln!(self.out, "Invalid choice! Please try again.")?,
                MenuInput::NotANumber => writeln!(self.out, "Invalid input! Please enter a number.")?,
            }
        }
    }

    async fn dispatch(&mut self, choice: MenuChoice, system: &InventorySystem) -> io::Result<()> {
        match choice {
            MenuChoice::AddProduct => self.add_product(system).await,
            MenuChoice::ViewAll => self.show_all(system).await,
            MenuChoice::Sell => self.sell_product(system).await,
            MenuChoice::Restock => self.restock_product(system).await,
            MenuChoice::LowStock => self.show_low_stock(system).await,
            MenuChoice::Report => self.generate_report(system).await,
            MenuChoice::SaveAndExit => self.save_and_exit(system).await,
        }
    }

    /// Next input line, printing any alerts that arrive meanwhile.
    async fn read_line(&mut self) -> io::Result<Option<String>> {
        loop {
            let Some(alerts) = self.alerts.as_mut() else {
                return self.lines.next_line().await;
            };

            let event = tokio::select! {
                line = self.lines.next_line() => ConsoleEvent::Line(line),
                alert = alerts.recv() => ConsoleEvent::Alert(alert),
            };

            match event {
                ConsoleEvent::Line(line) => return line,
                ConsoleEvent::Alert(Some(alert)) => {
                    writeln!(self.out, "\n{}", alert)?;
                    self.out.flush()?;
                }
                ConsoleEvent::Alert(None) => self.alerts = None,
            }
        }
    }

    async fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.out, "{}", label)?;
        self.out.flush()?;
        self.read_line().await
    }

    /// Prompt for a value; `None` means the input was missing or malformed
    /// and the message has already been printed.
    async fn prompt_parsed<T>(
        &mut self,
        label: &str,
        parse: impl Fn(&str) -> Option<T>,
        invalid_message: &str,
    ) -> io::Result<Option<T>> {
        match self.prompt(label).await? {
            Some(line) => match parse(&line) {
                Some(value) => Ok(Some(value)),
                None => {
                    writeln!(self.out, "{}", invalid_message)?;
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    async fn add_product(&mut self, system: &InventorySystem) -> io::Result<()> {
        let Some(id) = self
            .prompt_parsed("Enter Product ID: ", parse_number, "Invalid input format!")
            .await?
        else {
            return Ok(());
        };
        let Some(name) = self.prompt("Enter Product Name: ").await? else {
            return Ok(());
        };
        let Some(price) = self
            .prompt_parsed("Enter Price: ", parse_price, "Invalid price format!")
            .await?
        else {
            return Ok(());
        };
        let Some(quantity) = self
            .prompt_parsed("Enter Quantity: ", parse_number, "Invalid input format!")
            .await?
        else {
            return Ok(());
        };
        let Some(kind) = self.prompt("Is it perishable (y/n)? ").await? else {
            return Ok(());
        };

        let record = if kind.trim().eq_ignore_ascii_case("y") {
            let Some(expiry) = self.prompt("Enter Expiry Date (DD-MM-YYYY): ").await? else {
                return Ok(());
            };
            ProductRecord::perishable(id, name, price, quantity, expiry)
        } else {
            let Some(warranty) = self.prompt("Enter Warranty (or N/A): ").await? else {
                return Ok(());
            };
            ProductRecord::non_perishable(id, name, price, quantity, warranty)
        };

        match system.inventory_client.add_product(record).await {
            Ok(()) => writeln!(self.out, "Product added successfully!"),
            Err(e) => self.service_unavailable(e),
        }
    }

    async fn show_all(&mut self, system: &InventorySystem) -> io::Result<()> {
        let records = match system.inventory_client.list_all().await {
            Ok(records) => records,
            Err(e) => return self.service_unavailable(e),
        };

        if records.is_empty() {
            return writeln!(self.out, "No products in inventory.");
        }

        writeln!(self.out, "CURRENT INVENTORY")?;
        writeln!(self.out, "{}", TABLE_RULE)?;
        writeln!(
            self.out,
            "{:<6} {:<20} {:<11} {:<10} {:<14} {}",
            "ID", "Name", "Price (₹)", "Quantity", "Type", "Extra Info"
        )?;
        writeln!(self.out, "{}", TABLE_RULE)?;
        for record in &records {
            writeln!(self.out, "{}", record.describe())?;
        }
        writeln!(self.out, "{}", TABLE_RULE)?;
        writeln!(self.out, "Total Products: {}", records.len())
    }

    async fn sell_product(&mut self, system: &InventorySystem) -> io::Result<()> {
        let Some((id, quantity)) = self.prompt_id_and_quantity("Enter Quantity to sell: ").await?
        else {
            return Ok(());
        };

        match system.inventory_client.sell_product(id, quantity).await {
            Ok(receipt) => writeln!(
                self.out,
                "Sale successful! Remaining quantity: {}",
                receipt.remaining
            ),
            Err(InventoryError::NotFound(_)) => writeln!(self.out, "Product not found!"),
            Err(InventoryError::InsufficientStock { available, .. }) => {
                writeln!(self.out, "Insufficient stock! Available: {}", available)
            }
            Err(e) => self.service_unavailable(e),
        }
    }

    async fn restock_product(&mut self, system: &InventorySystem) -> io::Result<()> {
        let Some((id, quantity)) = self
            .prompt_id_and_quantity("Enter Quantity to restock: ")
            .await?
        else {
            return Ok(());
        };

        match system.inventory_client.restock_product(id, quantity).await {
            Ok(RestockOutcome::Restocked { new_quantity }) => {
                writeln!(self.out, "Product restocked! New quantity: {}", new_quantity)
            }
            Ok(RestockOutcome::NotFound) => writeln!(self.out, "Product not found!"),
            Err(e) => self.service_unavailable(e),
        }
    }

    async fn prompt_id_and_quantity(&mut self, quantity_label: &str) -> io::Result<Option<(u32, u32)>> {
        let Some(id) = self
            .prompt_parsed("Enter Product ID: ", parse_number, "Invalid input format!")
            .await?
        else {
            return Ok(None);
        };
        let quantity = self
            .prompt_parsed(quantity_label, parse_number, "Invalid input format!")
            .await?;
        Ok(quantity.map(|quantity| (id, quantity)))
    }

    async fn show_low_stock(&mut self, system: &InventorySystem) -> io::Result<()> {
        let low = match system
            .inventory_client
            .low_stock_scan(self.low_stock_threshold)
            .await
        {
            Ok(low) => low,
            Err(e) => return self.service_unavailable(e),
        };

        writeln!(self.out, "\nLow Stock Alert!")?;
        if low.is_empty() {
            return writeln!(self.out, "All products are well stocked!");
        }
        for record in &low {
            writeln!(self.out, " - {} ({} left)", record.name, record.quantity)?;
        }
        Ok(())
    }

    async fn generate_report(&mut self, system: &InventorySystem) -> io::Result<()> {
        let report = match system.build_report().await {
            Ok(report) => report,
            Err(e) => return self.service_unavailable(e),
        };

        writeln!(self.out, "\nDAILY INVENTORY REPORT")?;
        writeln!(self.out, "{}", TABLE_RULE)?;
        write!(self.out, "{}", report.summary.totals_block())?;

        match system.save_report(&report) {
            Ok(()) => writeln!(
                self.out,
                "Report generated and saved to '{}'",
                system.report_location().display()
            ),
            Err(e) => writeln!(self.out, "Error saving report: {}", e),
        }
    }

    async fn save_and_exit(&mut self, system: &InventorySystem) -> io::Result<()> {
        match system.save_inventory().await {
            Ok(_) => writeln!(self.out, "Inventory saved successfully!")?,
            Err(e) => writeln!(self.out, "Error saving data: {}", e)?,
        }
        writeln!(self.out, "Thank you for using Smart Inventory System!")?;
        self.out.flush()
    }

    fn service_unavailable(&mut self, e: InventoryError) -> io::Result<()> {
        writeln!(self.out, "Inventory service unavailable: {}", e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sample_products;
    use crate::monitor::MonitorConfig;
    use crate::persistence::MemoryGateway;
    use std::sync::Arc;
    use std::time::Duration;

    async fn run_script(script: &str) -> (String, Arc<MemoryGateway>) {
        let gateway = Arc::new(MemoryGateway::default());
        let (alert_tx, alert_rx) = mpsc::channel(4);
        let config = MonitorConfig {
            interval: Duration::from_secs(3600),
            threshold: 10,
        };
        let system = InventorySystem::start(gateway.clone(), config, alert_tx);

        let mut console = Console::new(script.as_bytes(), Vec::new(), alert_rx, 10);
        console.run(&system).await.unwrap();
        system.shutdown().await.unwrap();

        let output = String::from_utf8(console.into_output()).unwrap();
        (output, gateway)
    }

    #[tokio::test]
    async fn test_view_all_lists_samples() {
        let (output, _) = run_script("2\n7\n").await;

        assert!(output.contains("CURRENT INVENTORY"));
        assert!(output.contains("Tea Leaves"));
        assert!(output.contains("Total Products: 4"));
        assert!(output.contains("Thank you for using Smart Inventory System!"));
    }

    #[tokio::test]
    async fn test_sell_and_restock_flows() {
        let (output, gateway) = run_script("3\n101\n5\n3\n102\n50\n3\n999\n1\n4\n103\n8\n4\n999\n1\n7\n").await;

        assert!(output.contains("Sale successful! Remaining quantity: 10"));
        assert!(output.contains("Insufficient stock! Available: 4"));
        assert!(output.contains("Product restocked! New quantity: 10"));
        assert_eq!(output.matches("Product not found!").count(), 2);

        let saved = gateway.saved().unwrap();
        assert_eq!(saved[0].quantity, 10);
        assert_eq!(saved[1].quantity, 4);
        assert_eq!(saved[2].quantity, 10);
    }

    #[tokio::test]
    async fn test_add_product_flow() {
        let (output, gateway) =
            run_script("1\n201\nBasmati Rice\n₹1,250.50\n3\nn\n1 year\n1\n202\nPaneer\n80\n6\ny\n01-12-2025\n7\n").await;

        assert_eq!(output.matches("Product added successfully!").count(), 2);
        let saved = gateway.saved().unwrap();
        assert_eq!(saved.len(), 6);
        assert_eq!(
            saved[4],
            ProductRecord::non_perishable(201, "Basmati Rice", 1250.5, 3, "1 year")
        );
        assert_eq!(
            saved[5],
            ProductRecord::perishable(202, "Paneer", 80.0, 6, "01-12-2025")
        );
    }

    #[tokio::test]
    async fn test_bad_input_reprompts() {
        let (output, gateway) = run_script("abc\n9\n1\n300\nWidget\ncheap\n3\nxyz\n7\n").await;

        assert!(output.contains("Invalid input! Please enter a number."));
        assert!(output.contains("Invalid choice! Please try again."));
        assert!(output.contains("Invalid price format!"));
        assert!(output.contains("Invalid input format!"));
        assert_eq!(gateway.saved().unwrap(), sample_products());
    }

    #[tokio::test]
    async fn test_low_stock_and_report() {
        let (output, gateway) = run_script("5\n6\n7\n").await;

        assert!(output.contains(" - Sugar (4 left)"));
        assert!(output.contains(" - Tea Leaves (2 left)"));
        assert!(!output.contains(" - Milk"));
        assert!(output.contains("Total Stock Value: ₹ 2,010.00"));
        assert!(output.contains("Report generated and saved to 'memory'"));
        assert_eq!(gateway.reports().len(), 1);
    }

    #[tokio::test]
    async fn test_end_of_input_saves() {
        let (output, gateway) = run_script("3\n101\n1\n").await;

        assert!(output.contains("Inventory saved successfully!"));
        assert_eq!(gateway.saved().unwrap()[0].quantity, 14);
    }

    #[tokio::test]
    async fn test_text_fields_are_stored_as_typed() {
        let (_, gateway) = run_script("1\n203\n  Green Tea \n120\n7\ny\n 31-01-2026\n7\n").await;

        let saved = gateway.saved().unwrap();
        assert_eq!(
            saved[4],
            ProductRecord::perishable(203, "  Green Tea ", 120.0, 7, " 31-01-2026")
        );
    }

    /// Writer whose output stops working after a fixed number of writes.
    struct BrokenAfter(usize);

    impl Write for BrokenAfter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.0 == 0 {
                return Err(io::ErrorKind::BrokenPipe.into());
            }
            self.0 -= 1;
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_output_failure_still_saves_inventory() {
        let gateway = Arc::new(MemoryGateway::default());
        let (alert_tx, alert_rx) = mpsc::channel(4);
        let config = MonitorConfig {
            interval: Duration::from_secs(3600),
            threshold: 10,
        };
        let system = InventorySystem::start(gateway.clone(), config, alert_tx);

        let mut console = Console::new("3\n101\n5\n2\n7\n".as_bytes(), BrokenAfter(12), alert_rx, 10);
        let result = console.run(&system).await;
        system.shutdown().await.unwrap();

        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::BrokenPipe);
        let saved = gateway.saved().expect("inventory saved despite output failure");
        assert_eq!(saved[0].quantity, 10);
    }

    #[tokio::test]
    async fn test_alerts_are_printed_while_waiting() {
        let gateway = Arc::new(MemoryGateway::default());
        let (monitor_tx, _monitor_rx) = mpsc::channel(4);
        let system = InventorySystem::start(
            gateway,
            MonitorConfig {
                interval: Duration::from_secs(3600),
                threshold: 10,
            },
            monitor_tx,
        );

        let (alert_tx, alert_rx) = mpsc::channel(4);
        alert_tx
            .send(LowStockAlert {
                count: 2,
                names: vec!["Sugar".into(), "Tea Leaves".into()],
            })
            .await
            .unwrap();
        drop(alert_tx);

        // Input arrives only after the alert is already queued.
        let (reader, mut writer) = tokio::io::duplex(64);
        let feeder = tokio::spawn(async move {
            use tokio::io::AsyncWriteExt;
            tokio::time::sleep(Duration::from_millis(20)).await;
            writer.write_all(b"7\n").await.unwrap();
        });

        let mut console = Console::new(tokio::io::BufReader::new(reader), Vec::new(), alert_rx, 10);
        console.run(&system).await.unwrap();
        feeder.await.unwrap();
        system.shutdown().await.unwrap();

        let output = String::from_utf8(console.into_output()).unwrap();
        let alert_at = output
            .find("[Background Alert] 2 product(s) running low on stock!")
            .expect("alert printed");
        assert!(alert_at < output.find("Thank you").unwrap());
    }
}
