fn main() {
    mailbox_engine::uci::run_uci_loop();
}
