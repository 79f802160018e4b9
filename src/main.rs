fn main() {
    microbasic::term::main()
}
