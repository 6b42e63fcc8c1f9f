fn main() {
    devops_info_service_api::main();
}
