use state_machines::state_machine;

state_machine! {
    name: IngestionMachine,
    state: IngestionState,
    initial: Ready,
    states: [Ready, Segmented, Embedded, Persisted, Failed],
    events {
        segment { transition: { from: Ready, to: Segmented } }
        embed { transition: { from: Segmented, to: Embedded } }
        persist { transition: { from: Embedded, to: Persisted } }
        abort {
            transition: { from: Ready, to: Failed }
            transition: { from: Segmented, to: Failed }
            transition: { from: Embedded, to: Failed }
            transition: { from: Persisted, to: Failed }
        }
    }
}

pub fn ready() -> IngestionMachine<(), Ready> {
    IngestionMachine::new(())
}
