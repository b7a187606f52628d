use calico::native::{args_from_native, DISCRIMINANT_KEY};
use calico::schema::{EnumDescriptor, FieldDescriptor, StructDescriptor, VariantDescriptor};
use calico::{
    ArgDescriptor, Argument, CodecResult, NativeValue, Record, Serializer, ToNative,
    TypeDescriptor,
};
use tracing_subscriber::EnvFilter;

fn transfer_schema() -> Vec<ArgDescriptor> {
    let payment = StructDescriptor::new(
        "Payment",
        vec![
            FieldDescriptor::new("to", TypeDescriptor::Address),
            FieldDescriptor::new("amount", TypeDescriptor::biguint()),
        ],
    );
    let priority = EnumDescriptor::new(
        "Priority",
        vec![
            VariantDescriptor::unit(0, "Low"),
            VariantDescriptor::new(1, "High", vec![FieldDescriptor::new("fee", TypeDescriptor::u32())]),
        ],
    );
    vec![
        TypeDescriptor::Struct(payment).into(),
        TypeDescriptor::Enum(priority).into(),
        ArgDescriptor::optional(TypeDescriptor::Str.into()),
    ]
}

fn check(natives: &[NativeValue]) -> CodecResult<()> {
    let schema = transfer_schema();
    let serializer = Serializer::new();

    let mut args: Vec<Argument> = schema.iter().map(ArgDescriptor::instantiate).collect();
    args_from_native(&mut args, natives)?;
    let text = serializer.serialize(&args)?;
    println!("{}", text);

    let mut decoded: Vec<Argument> = schema.iter().map(ArgDescriptor::instantiate).collect();
    serializer.deserialize(&text, &mut decoded)?;
    assert_eq!(decoded, args);
    for arg in &decoded {
        println!("  {:?}", arg.to_native());
    }
    Ok(())
}

fn main() -> CodecResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let payment = Record::new()
        .with("to", "00".repeat(31) + "01")
        .with("amount", 1_000_000u64);
    check(&[NativeValue::from(payment.clone()), NativeValue::from(0u8)])?;
    check(&[
        NativeValue::from(payment),
        NativeValue::from(Record::new().with(DISCRIMINANT_KEY, 1u8).with("fee", 250u32)),
        NativeValue::from("rush"),
    ])?;
    Ok(())
}
